//! Integration tests for PgWarehouseRepository against a migrated Postgres container

use domain_warehouses::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use test_utils::TestDatabase;

async fn stock(db: &TestDatabase, warehouse_id: i32, branch_id: i32, quantity: i32) -> i32 {
    let product = db
        .connection
        .query_one_raw(Statement::from_string(
            DatabaseBackend::Postgres,
            "INSERT INTO products (name, category_id, region, unit, sale_price) \
             VALUES ('Rau muống', 1, 'Miền Bắc', 'bó', 8000) RETURNING id",
        ))
        .await
        .unwrap()
        .unwrap();
    let product_id: i32 = product.try_get("", "id").unwrap();

    let row = db
        .connection
        .query_one_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "INSERT INTO inventory (warehouse_id, branch_id, product_id, quantity) \
             VALUES ($1, $2, $3, $4) RETURNING id",
            [
                warehouse_id.into(),
                branch_id.into(),
                product_id.into(),
                quantity.into(),
            ],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "id").unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_warehouse_with_branch_lookup() {
    let db = TestDatabase::new().await;
    let service = WarehouseService::new(PgWarehouseRepository::new(db.connection()));

    let id = service
        .create_warehouse(NewWarehouse {
            branch_id: 3,
            name: "Kho Thủ Đức".into(),
            capacity: Some(1200),
            ..Default::default()
        })
        .await
        .unwrap();

    let warehouse = service.get_warehouse(id).await.unwrap();
    assert!(warehouse.active);
    assert_eq!(warehouse.branch_name.as_deref(), Some("Chi nhánh TP.HCM"));
    assert_eq!(warehouse.region.as_deref(), Some("Miền Nam"));

    service
        .update_warehouse(
            id,
            UpdateWarehouse {
                name: "Kho Thủ Đức mới".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let warehouse = service.get_warehouse(id).await.unwrap();
    assert_eq!(warehouse.name, "Kho Thủ Đức mới");
    assert_eq!(warehouse.capacity, None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_removes_stock_and_hides_warehouse() {
    let db = TestDatabase::new().await;
    let service = WarehouseService::new(PgWarehouseRepository::new(db.connection()));

    let id = service
        .create_warehouse(NewWarehouse {
            branch_id: 1,
            name: "Kho Gia Lâm".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let stock_id = stock(&db, id, 1, 30).await;

    service.update_stock(stock_id, 45).await.unwrap();
    let items = service
        .list_inventory(&list_query::RegionParams {
            vungmien: Some("Miền Bắc".into()),
        })
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 45);
    assert_eq!(items[0].warehouse_name.as_deref(), Some("Kho Gia Lâm"));

    service.delete_warehouse(id).await.unwrap();
    assert!(matches!(
        service.get_warehouse(id).await,
        Err(WarehouseError::WarehouseNotFound(_))
    ));
    assert!(service.list_warehouses().await.unwrap().is_empty());
    assert!(matches!(
        service.update_stock(stock_id, 1).await,
        Err(WarehouseError::InventoryNotFound(_))
    ));
}
