//! Integration tests for PgCustomerRepository against a migrated Postgres container

use domain_customers::*;
use list_query::ListParams;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use test_utils::TestDatabase;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_find_and_search() {
    let db = TestDatabase::new().await;
    let service = CustomerService::new(PgCustomerRepository::new(db.connection()));

    let id = service
        .create_customer(NewCustomer {
            name: "Nguyễn Văn An".into(),
            phone: Some("0901234567".into()),
            region: Some("Miền Nam".into()),
            nearest_branch_id: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    let customer = service.get_customer(id).await.unwrap();
    assert_eq!(customer.customer_type, DEFAULT_CUSTOMER_TYPE);
    assert_eq!(customer.branch_name.as_deref(), Some("Chi nhánh TP.HCM"));

    let found = service
        .list_customers(&ListParams {
            search: Some("4567".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);

    let none = service
        .list_customers(&ListParams {
            vungmien: Some("Miền Bắc".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_blocked_by_order() {
    let db = TestDatabase::new().await;
    let id = db.create_customer("Lê Thị Bình", "Miền Bắc").await;
    let service = CustomerService::new(PgCustomerRepository::new(db.connection()));

    db.connection
        .execute_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "INSERT INTO orders (id, customer_id, region) VALUES (gen_random_uuid(), $1, 'Miền Bắc')",
            [id.into()],
        ))
        .await
        .unwrap();

    assert!(matches!(
        service.delete_customer(id).await,
        Err(CustomerError::HasOrders { orders: 1, .. })
    ));

    db.connection
        .execute_unprepared("DELETE FROM orders")
        .await
        .unwrap();
    service.delete_customer(id).await.unwrap();
    assert!(matches!(
        service.get_customer(id).await,
        Err(CustomerError::NotFound(_))
    ));
}
