//! Sea-ORM entities for warehouses and inventory

pub mod warehouse {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    use crate::models::{NewWarehouse, UpdateWarehouse};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "warehouses")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub branch_id: i32,
        pub name: String,
        pub address: Option<String>,
        pub manager: Option<String>,
        pub capacity: Option<i32>,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<NewWarehouse> for ActiveModel {
        fn from(input: NewWarehouse) -> Self {
            ActiveModel {
                branch_id: Set(input.branch_id),
                name: Set(input.name),
                address: Set(input.address),
                manager: Set(input.manager),
                capacity: Set(input.capacity),
                active: Set(true),
                ..Default::default()
            }
        }
    }

    impl From<UpdateWarehouse> for ActiveModel {
        fn from(input: UpdateWarehouse) -> Self {
            ActiveModel {
                name: Set(input.name),
                address: Set(input.address),
                manager: Set(input.manager),
                capacity: Set(input.capacity),
                ..Default::default()
            }
        }
    }
}

pub mod inventory {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "inventory")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub warehouse_id: i32,
        pub branch_id: Option<i32>,
        pub product_id: i32,
        pub quantity: i32,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
