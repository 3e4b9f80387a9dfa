use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(pk_auto(Branches::Id))
                    .col(string(Branches::Name))
                    .col(string_null(Branches::Address))
                    .col(string_null(Branches::Phone))
                    .col(string(Branches::Region))
                    .col(boolean(Branches::Active).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(string_null(Categories::Kind))
                    .col(boolean(Categories::Active).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(pk_auto(Suppliers::Id))
                    .col(string(Suppliers::Name))
                    .col(string_null(Suppliers::Address))
                    .col(string_null(Suppliers::Phone))
                    .col(string_null(Suppliers::Email))
                    .col(boolean(Suppliers::Active).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branches_region")
                    .table(Branches::Table)
                    .col(Branches::Region)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Branches {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Region,
    Active,
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Kind,
    Active,
}

#[derive(DeriveIden)]
pub enum Suppliers {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    Active,
}
