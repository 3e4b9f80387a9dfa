use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::ProductInput;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub supplier_id: Option<i32>,
    pub region: String,
    pub unit: String,
    #[sea_orm(column_type = "Double")]
    pub cost_price: f64,
    #[sea_orm(column_type = "Double")]
    pub sale_price: f64,
    pub stock: i32,
    pub expiry_date: Option<Date>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<ProductInput> for ActiveModel {
    fn from(input: ProductInput) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            category_id: Set(input.category_id),
            supplier_id: Set(input.supplier_id),
            region: Set(input.region),
            unit: Set(input.unit),
            cost_price: Set(input.cost_price),
            sale_price: Set(input.sale_price),
            stock: Set(input.stock),
            expiry_date: Set(input.expiry_date),
            active: Set(true),
        }
    }
}
