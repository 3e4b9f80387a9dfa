//! Sea-ORM entities for orders and their lines

pub mod order {
    use chrono::Utc;
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    use crate::models::NewOrder;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: i32,
        pub branch_id: Option<i32>,
        pub region: String,
        pub ordered_at: DateTimeUtc,
        pub total: f64,
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl ActiveModel {
        pub fn new_order(id: Uuid, input: &NewOrder) -> Self {
            ActiveModel {
                id: Set(id),
                customer_id: Set(input.customer_id),
                branch_id: Set(input.branch_id),
                region: Set(input.region.clone()),
                ordered_at: Set(Utc::now()),
                total: Set(input.total()),
                status: Set(input.status_or_default()),
            }
        }
    }
}

pub mod order_line {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    use crate::models::NewOrderLine;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_lines")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub order_id: Uuid,
        pub product_id: i32,
        pub quantity: i32,
        pub unit_price: f64,
        pub line_total: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl ActiveModel {
        pub fn for_order(order_id: Uuid, line: &NewOrderLine) -> Self {
            ActiveModel {
                order_id: Set(order_id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(line.line_total()),
                ..Default::default()
            }
        }
    }
}
