//! Promotions Service

use async_trait::async_trait;
use emporium::prelude::PromotionDraft;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    api::ApiClient,
    promotions::{
        PromotionsServiceError,
        records::{PromotionId, PromotionRecord, StoreId},
    },
};

/// [`PromotionsService`] backed by the marketplace HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPromotionsService {
    api: ApiClient,
}

impl HttpPromotionsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn collection_path(store: &StoreId) -> String {
    format!("stores/{store}/promotions")
}

fn promotion_path(store: &StoreId, promotion: &PromotionId) -> String {
    format!("stores/{store}/promotions/{promotion}")
}

#[async_trait]
impl PromotionsService for HttpPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, draft),
        fields(
            store_id = %store,
            promotion_type = %draft.promotion_type(),
            promotion_id = tracing::field::Empty
        ),
        err
    )]
    async fn create_promotion(
        &self,
        store: StoreId,
        draft: PromotionDraft,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let record: PromotionRecord = self.api.post(&collection_path(&store), &draft).await?;

        Span::current().record("promotion_id", tracing::field::display(&record.id));

        info!(promotion_id = %record.id, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, draft),
        fields(
            store_id = %store,
            promotion_id = %promotion,
            promotion_type = %draft.promotion_type()
        ),
        err
    )]
    async fn update_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
        draft: PromotionDraft,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let record: PromotionRecord = self
            .api
            .put(&promotion_path(&store, &promotion), &draft)
            .await?;

        info!(promotion_id = %record.id, "updated promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion",
        skip(self),
        fields(store_id = %store, promotion_id = %promotion),
        err
    )]
    async fn get_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        Ok(self.api.get(&promotion_path(&store, &promotion)).await?)
    }

    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self),
        fields(store_id = %store, promotion_count = tracing::field::Empty),
        err
    )]
    async fn list_promotions(
        &self,
        store: StoreId,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let records: Vec<PromotionRecord> = self.api.get(&collection_path(&store)).await?;

        Span::current().record("promotion_count", records.len());

        Ok(records)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self),
        fields(store_id = %store, promotion_id = %promotion),
        err
    )]
    async fn delete_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
    ) -> Result<(), PromotionsServiceError> {
        self.api.delete(&promotion_path(&store, &promotion)).await?;

        info!(promotion_id = %promotion, "deleted promotion");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    async fn create_promotion(
        &self,
        store: StoreId,
        draft: PromotionDraft,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    async fn update_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
        draft: PromotionDraft,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    async fn get_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    async fn list_promotions(
        &self,
        store: StoreId,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    async fn delete_promotion(
        &self,
        store: StoreId,
        promotion: PromotionId,
    ) -> Result<(), PromotionsServiceError>;
}
