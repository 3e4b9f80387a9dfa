//! Handler tests for the products domain
//!
//! These run the router against the in-memory stores:
//! - multipart form parsing
//! - the `{ success, ... }` envelope and status codes
//! - the create → read → delete → read lifecycle

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "----nongsan-test-boundary";

struct Stores {
    products: InMemoryProductRepository,
    details: InMemoryDetailRepository,
    images: InMemoryImageStore,
}

impl Stores {
    fn new() -> Self {
        Self {
            products: InMemoryProductRepository::new(),
            details: InMemoryDetailRepository::new(),
            images: InMemoryImageStore::new(),
        }
    }

    fn app(&self) -> Router {
        handlers::router(ProductService::new(
            self.products.clone(),
            self.details.clone(),
            self.images.clone(),
        ))
    }
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn form_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const TEST_PRODUCT: [(&str, &str); 5] = [
    ("TenHangHoa", "Test"),
    ("MaDanhMuc", "1"),
    ("VungMien", "MienBac"),
    ("DonGiaBan", "1000"),
    ("SoLuongTon", "5"),
];

#[tokio::test]
async fn test_product_lifecycle_create_get_delete() {
    let stores = Stores::new();

    let response = stores
        .app()
        .oneshot(form_request(
            "POST",
            "/product",
            multipart(&TEST_PRODUCT, None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["imageUrl"], Value::Null);
    let id = body["data"]["MaHangHoa"].as_i64().unwrap();

    let response = stores
        .app()
        .oneshot(get(&format!("/product/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["SoLuongTon"], 5);
    assert_eq!(body["data"]["DonGiaBan"], 1000.0);
    assert_eq!(body["data"]["HinhAnh"], json!([]));
    assert_eq!(body["data"]["TrangThai"], true);

    let response = stores
        .app()
        .oneshot(delete(&format!("/product/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await["success"], true);

    let response = stores
        .app()
        .oneshot(get(&format!("/product/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product not found.");

    // Row kept, only deactivated
    let row = stores.products.get_raw(id as i32).await.unwrap();
    assert!(!row.active);
    assert!(stores.details.find(id as i32).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_with_image_then_replace_it() {
    let stores = Stores::new();

    let response = stores
        .app()
        .oneshot(form_request(
            "POST",
            "/product",
            multipart(&TEST_PRODUCT, Some(("cam.jpg", b"first"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    let id = body["data"]["MaHangHoa"].as_i64().unwrap();
    let first_url = body["data"]["imageUrl"].as_str().unwrap().to_string();

    let mut fields = TEST_PRODUCT.to_vec();
    fields.push(("MoTaChiTiet", "Cam ngọt"));
    let response = stores
        .app()
        .oneshot(form_request(
            "PUT",
            &format!("/product/{id}"),
            multipart(&fields, Some(("cam2.png", b"second"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    let second_url = body["data"]["imageUrl"].as_str().unwrap().to_string();
    assert_ne!(first_url, second_url);

    let response = stores
        .app()
        .oneshot(get(&format!("/product/{id}")))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["HinhAnh"], json!([second_url]));
    assert_eq!(body["data"]["MoTaChiTiet"], "Cam ngọt");

    assert_eq!(stores.images.destroyed().await.len(), 1);
    assert_eq!(stores.images.stored().await.len(), 1);
}

#[tokio::test]
async fn test_list_products_envelope_and_filters() {
    let stores = Stores::new();
    for (name, region, price) in [
        ("Rau muống", "Miền Bắc", "15000"),
        ("Sầu riêng", "Miền Nam", "120000"),
        ("Rau cải", "Miền Bắc", "12000"),
    ] {
        let response = stores
            .app()
            .oneshot(form_request(
                "POST",
                "/product",
                multipart(
                    &[
                        ("TenHangHoa", name),
                        ("MaDanhMuc", "1"),
                        ("VungMien", region),
                        ("DonGiaBan", price),
                    ],
                    None,
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = stores.app().oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);

    let uri = "/products?vungmien=Mi%E1%BB%81n%20B%E1%BA%AFc&sortBy=DonGiaBan&sortOrder=asc";
    let response = stores.app().oneshot(get(uri)).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["TenHangHoa"], "Rau cải");

    // Unknown sort column and malformed limit fall back to defaults
    let response = stores
        .app()
        .oneshot(get("/products?sortBy=password&limit=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"][0]["TenHangHoa"], "Rau cải");
}

#[tokio::test]
async fn test_invalid_id_returns_400() {
    let stores = Stores::new();

    let response = stores.app().oneshot(get("/product/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_with_missing_fields_returns_400() {
    let stores = Stores::new();

    let response = stores
        .app()
        .oneshot(form_request(
            "POST",
            "/product",
            multipart(&[("TenHangHoa", "Test")], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(stores.products.get_raw(1).await.is_none());
}

#[tokio::test]
async fn test_create_rejects_non_image_upload() {
    let stores = Stores::new();

    let response = stores
        .app()
        .oneshot(form_request(
            "POST",
            "/product",
            multipart(&TEST_PRODUCT, Some(("notes.txt", b"hello"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stores.images.stored().await.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_unknown_product_return_404() {
    let stores = Stores::new();

    let response = stores
        .app()
        .oneshot(form_request(
            "PUT",
            "/product/42",
            multipart(&TEST_PRODUCT, None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = stores.app().oneshot(delete("/product/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_statistics_without_documents() {
    let stores = Stores::new();

    let response = stores.app().oneshot(get("/statistics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["theoVungMien"], json!([]));
    assert_eq!(body["data"]["tongQuan"], json!({}));

    stores
        .app()
        .oneshot(form_request(
            "POST",
            "/product",
            multipart(&TEST_PRODUCT, None),
        ))
        .await
        .unwrap();

    let response = stores.app().oneshot(get("/statistics")).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["theoVungMien"][0]["VungMien"], "MienBac");
    assert_eq!(body["data"]["theoVungMien"][0]["TongSoLuongTon"], 5);
    assert_eq!(body["data"]["tongQuan"]["tongSanPhamCoChiTiet"], 1);
}
