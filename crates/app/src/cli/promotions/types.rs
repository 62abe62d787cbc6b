use clap::Args;
use tabled::{
    Table, Tabled,
    settings::{Style, Width, object::Columns},
};

use emporium::prelude::{Bucket, DraftField, PromotionType};

#[derive(Debug, Args)]
pub(crate) struct TypesArgs {}

#[derive(Debug, Tabled)]
struct TypeRow {
    #[tabled(rename = "type")]
    name: &'static str,

    label: &'static str,

    description: &'static str,

    fields: String,

    conditions: String,
}

impl From<PromotionType> for TypeRow {
    fn from(promotion_type: PromotionType) -> Self {
        Self {
            name: promotion_type.as_str(),
            label: promotion_type.label(),
            description: promotion_type.description(),
            fields: promotion_type
                .fields()
                .iter()
                .copied()
                .map(DraftField::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            conditions: promotion_type
                .buckets()
                .iter()
                .copied()
                .map(Bucket::key)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub(crate) fn run(_args: &TypesArgs) -> Result<(), String> {
    println!("{}", render());

    Ok(())
}

fn render() -> String {
    let mut table = Table::new(PromotionType::ALL.map(TypeRow::from));

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Width::wrap(40).keep_words(true));

    table.to_string()
}
