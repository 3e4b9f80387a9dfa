//! Integration tests for PgOrderRepository against a migrated Postgres container

use domain_orders::*;
use list_query::ListParams;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use test_utils::TestDatabase;

async fn insert_product(db: &TestDatabase, name: &str) -> i32 {
    let row = db
        .connection
        .query_one_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "INSERT INTO products (name, category_id, region, unit, sale_price) \
             VALUES ($1, 1, 'Miền Nam', 'kg', 50000) RETURNING id",
            [name.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "id").unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_order_round_trip_through_postgres() {
    let db = TestDatabase::new().await;
    let customer = db.create_customer("Trần Văn Cường", "Miền Nam").await;
    let mango = insert_product(&db, "Xoài").await;
    let rice = insert_product(&db, "Gạo").await;
    let service = OrderService::new(PgOrderRepository::new(db.connection()));

    let id = service
        .create_order(NewOrder {
            customer_id: customer,
            region: "Miền Nam".into(),
            branch_id: Some(3),
            status: None,
            lines: vec![
                NewOrderLine {
                    product_id: mango,
                    quantity: 3,
                    unit_price: 40000.0,
                },
                NewOrderLine {
                    product_id: rice,
                    quantity: 1,
                    unit_price: 150000.0,
                },
            ],
        })
        .await
        .unwrap();

    let order = service.get_order(id).await.unwrap();
    assert_eq!(order.total, 270000.0);
    assert_eq!(order.status, DEFAULT_ORDER_STATUS);
    assert_eq!(order.customer.name.as_deref(), Some("Trần Văn Cường"));
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].product_name.as_deref(), Some("Xoài"));

    let listed = service
        .list_orders(&ListParams {
            search: Some("cường".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].branch_name.as_deref(), Some("Chi nhánh TP.HCM"));

    service.update_status(id, "Đã giao".into()).await.unwrap();
    assert_eq!(service.get_order(id).await.unwrap().status, "Đã giao");

    service.delete_order(id).await.unwrap();
    assert!(matches!(
        service.get_order(id).await,
        Err(OrderError::NotFound(_))
    ));
    let remaining = db
        .connection
        .query_one_raw(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS total FROM order_lines",
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(remaining.try_get::<i64>("", "total").unwrap(), 0);
}
