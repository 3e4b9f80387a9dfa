pub use sea_orm_migration::prelude::*;

mod m20250301_000000_create_reference_tables;
mod m20250301_000001_create_products;
mod m20250301_000002_create_customers_orders;
mod m20250301_000003_create_warehouses_inventory;
mod m20250301_000004_seed_reference_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_create_reference_tables::Migration),
            Box::new(m20250301_000001_create_products::Migration),
            Box::new(m20250301_000002_create_customers_orders::Migration),
            Box::new(m20250301_000003_create_warehouses_inventory::Migration),
            Box::new(m20250301_000004_seed_reference_data::Migration),
        ]
    }
}
