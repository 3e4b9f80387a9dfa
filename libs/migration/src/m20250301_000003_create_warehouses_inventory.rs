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
                    .table(Warehouses::Table)
                    .if_not_exists()
                    .col(pk_auto(Warehouses::Id))
                    .col(integer(Warehouses::BranchId))
                    .col(string(Warehouses::Name))
                    .col(string_null(Warehouses::Address))
                    .col(string_null(Warehouses::Manager))
                    .col(integer_null(Warehouses::Capacity))
                    .col(boolean(Warehouses::Active).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warehouses_branch_id")
                            .from(Warehouses::Table, Warehouses::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventory::Id))
                    .col(integer(Inventory::WarehouseId))
                    .col(integer_null(Inventory::BranchId))
                    .col(integer(Inventory::ProductId))
                    .col(integer(Inventory::Quantity).default(0))
                    .col(
                        timestamp_with_time_zone(Inventory::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_warehouse_id")
                            .from(Inventory::Table, Inventory::WarehouseId)
                            .to(Warehouses::Table, Warehouses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_branch_id")
                            .from(Inventory::Table, Inventory::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_product_id")
                            .from(Inventory::Table, Inventory::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_warehouse_id")
                    .table(Inventory::Table)
                    .col(Inventory::WarehouseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_updated_at")
                    .table(Inventory::Table)
                    .col(Inventory::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Warehouses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Warehouses {
    Table,
    Id,
    BranchId,
    Name,
    Address,
    Manager,
    Capacity,
    Active,
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    WarehouseId,
    BranchId,
    ProductId,
    Quantity,
    UpdatedAt,
}
