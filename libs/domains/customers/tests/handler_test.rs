//! Handler tests for the customers domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_customers::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: &InMemoryCustomerRepository) -> Router {
    handlers::router(CustomerService::new(repo.clone()))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_customer_lifecycle() {
    let repo = InMemoryCustomerRepository::new();
    repo.add_branch(3, "Chi nhánh TP.HCM").await;

    let response = app(&repo)
        .oneshot(request(
            "POST",
            "/customer",
            Some(json!({
                "TenKhachHang": "Nguyễn Văn An",
                "SoDienThoai": "0901234567",
                "VungMien": "Miền Nam",
                "MaChiNhanhGanNhat": 3
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response.into_body()).await["data"]["MaKhachHang"]
        .as_i64()
        .unwrap();

    let response = app(&repo)
        .oneshot(request("GET", &format!("/customer/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["LoaiKhachHang"], "Thường");
    assert_eq!(body["data"]["DiemTichLuy"], 0);
    assert_eq!(body["data"]["TenChiNhanh"], "Chi nhánh TP.HCM");

    let response = app(&repo)
        .oneshot(request(
            "PUT",
            &format!("/customer/{id}"),
            Some(json!({
                "TenKhachHang": "Nguyễn Văn An",
                "SoDienThoai": "0901234567",
                "LoaiKhachHang": "VIP"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&repo)
        .oneshot(request("GET", "/customers?search=0901&vungmien=Mi%E1%BB%81n%20Nam", None))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["LoaiKhachHang"], "VIP");
    // PUT replaces every contact field it covers
    assert_eq!(body["data"][0]["Email"], Value::Null);

    let response = app(&repo)
        .oneshot(request("DELETE", &format!("/customer/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&repo)
        .oneshot(request("GET", &format!("/customer/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_customer_with_orders_is_rejected() {
    let repo = InMemoryCustomerRepository::new();
    let id = repo
        .insert(NewCustomer {
            name: "Lê Thị Bình".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    repo.add_order(id).await;

    let response = app(&repo)
        .oneshot(request("DELETE", &format!("/customer/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("has orders"));

    assert!(repo.find(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_sorting_and_limit() {
    let repo = InMemoryCustomerRepository::new();
    for name in ["Bảo", "An", "Cúc"] {
        repo.insert(NewCustomer {
            name: name.into(),
            ..Default::default()
        })
        .await
        .unwrap();
    }

    let response = app(&repo)
        .oneshot(request(
            "GET",
            "/customers?sortBy=MaKhachHang&sortOrder=asc&limit=2",
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["TenKhachHang"], "Bảo");
    assert_eq!(body["data"][1]["TenKhachHang"], "An");

    // Unknown sort column falls back to the registration date, newest first
    let response = app(&repo)
        .oneshot(request("GET", "/customers?sortBy=Email", None))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"][0]["MaKhachHang"], 3);
}

#[tokio::test]
async fn test_invalid_input() {
    let repo = InMemoryCustomerRepository::new();

    let response = app(&repo)
        .oneshot(request(
            "POST",
            "/customer",
            Some(json!({"TenKhachHang": "X", "Email": "nope"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&repo)
        .oneshot(request("GET", "/customer/abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&repo)
        .oneshot(request(
            "PUT",
            "/customer/42",
            Some(json!({"TenKhachHang": "Ai đó"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
