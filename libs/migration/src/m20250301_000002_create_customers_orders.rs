use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_reference_tables::Branches;
use crate::m20250301_000001_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(string(Customers::Name))
                    .col(string_null(Customers::Email))
                    .col(string_null(Customers::Phone))
                    .col(string_null(Customers::Address))
                    .col(string_null(Customers::Region))
                    .col(string(Customers::CustomerType).default("Thường"))
                    .col(integer(Customers::LoyaltyPoints).default(0))
                    .col(
                        timestamp_with_time_zone(Customers::RegisteredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(Customers::NearestBranchId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customers_nearest_branch_id")
                            .from(Customers::Table, Customers::NearestBranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_uuid(Orders::Id))
                    .col(integer(Orders::CustomerId))
                    .col(integer_null(Orders::BranchId))
                    .col(string(Orders::Region))
                    .col(
                        timestamp_with_time_zone(Orders::OrderedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(double(Orders::Total).default(0.0))
                    .col(string(Orders::Status).default("Chờ xử lý"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer_id")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_branch_id")
                            .from(Orders::Table, Orders::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderLines::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderLines::Id))
                    .col(uuid(OrderLines::OrderId))
                    .col(integer(OrderLines::ProductId))
                    .col(integer(OrderLines::Quantity))
                    .col(double(OrderLines::UnitPrice))
                    .col(double(OrderLines::LineTotal))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_lines_order_id")
                            .from(OrderLines::Table, OrderLines::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_lines_product_id")
                            .from(OrderLines::Table, OrderLines::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer_id")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_ordered_at")
                    .table(Orders::Table)
                    .col(Orders::OrderedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_lines_order_id")
                    .table(OrderLines::Table)
                    .col(OrderLines::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    Region,
    CustomerType,
    LoyaltyPoints,
    RegisteredAt,
    NearestBranchId,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    BranchId,
    Region,
    OrderedAt,
    Total,
    Status,
}

#[derive(DeriveIden)]
enum OrderLines {
    Table,
    Id,
    OrderId,
    ProductId,
    Quantity,
    UnitPrice,
    LineTotal,
}
