//! Sea-ORM entity for the customers table

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{DEFAULT_CUSTOMER_TYPE, NewCustomer, UpdateCustomer, non_blank};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub customer_type: String,
    pub loyalty_points: i32,
    pub registered_at: DateTimeUtc,
    pub nearest_branch_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewCustomer> for ActiveModel {
    fn from(input: NewCustomer) -> Self {
        ActiveModel {
            name: Set(input.name),
            email: Set(non_blank(input.email)),
            phone: Set(non_blank(input.phone)),
            address: Set(non_blank(input.address)),
            region: Set(non_blank(input.region)),
            customer_type: Set(non_blank(input.customer_type)
                .unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string())),
            loyalty_points: Set(0),
            registered_at: Set(Utc::now()),
            nearest_branch_id: Set(input.nearest_branch_id),
            ..Default::default()
        }
    }
}

impl From<UpdateCustomer> for ActiveModel {
    fn from(input: UpdateCustomer) -> Self {
        ActiveModel {
            name: Set(input.name),
            email: Set(non_blank(input.email)),
            phone: Set(non_blank(input.phone)),
            address: Set(non_blank(input.address)),
            customer_type: Set(non_blank(input.customer_type)
                .unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string())),
            ..Default::default()
        }
    }
}
