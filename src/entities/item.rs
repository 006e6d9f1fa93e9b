use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Free text, set independently of the owning rack's category.
    pub category: String,
    pub price: f64,
    /// Integer percent, 0..=100.
    pub discount: i32,
    pub rack_id: i32,
    pub image_url: String,
    /// May go negative; no floor enforced.
    pub stock: i32,
}

impl Model {
    /// Unit price after applying the discount percentage.
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - f64::from(self.discount) / 100.0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rack::Entity",
        from = "Column::RackId",
        to = "super::rack::Column::Id"
    )]
    Rack,
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItems,
}

impl Related<super::rack::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rack.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, discount: i32) -> Model {
        Model {
            id: 1,
            name: "Tomato".into(),
            description: None,
            category: "Vegetables".into(),
            price,
            discount,
            rack_id: 1,
            image_url: String::new(),
            stock: 100,
        }
    }

    #[test]
    fn discounted_price_applies_percentage() {
        assert_eq!(item(100.0, 10).discounted_price(), 90.0);
        assert_eq!(item(100.0, 0).discounted_price(), 100.0);
    }
}
