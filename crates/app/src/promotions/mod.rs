//! Promotions

mod errors;
pub mod records;
pub mod service;

pub use errors::PromotionsServiceError;
pub use service::{HttpPromotionsService, MockPromotionsService, PromotionsService};
