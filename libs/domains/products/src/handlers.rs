//! HTTP handlers for the product endpoints

use axum::{
    Router,
    extract::{DefaultBodyLimit, Query, State},
    routing::{get, post},
};
use axum_helpers::{ApiResponse, ErrorResponse, IdPath};
use list_query::ListParams;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::form::{ProductForm, ProductFormBody};
use crate::models::{
    AttributeValue, CleanupReport, CreatedProduct, DetailOverview, Product, ProductView,
    RegionStatistics, Review, Statistics, UpdatedProduct,
};
use crate::repository::{DetailRepository, ImageStore, ProductRepository};
use crate::service::ProductService;

/// Upper bound of a product form, image included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        get_statistics,
    ),
    components(schemas(
        Product,
        ProductView,
        ProductFormBody,
        AttributeValue,
        Review,
        CreatedProduct,
        UpdatedProduct,
        CleanupReport,
        RegionStatistics,
        DetailOverview,
        Statistics,
        ErrorResponse
    )),
    tags(
        (name = "Products", description = "Products across Postgres, MongoDB and Cloudinary")
    )
)]
pub struct ApiDoc;

type SharedService<R, D, I> = Arc<ProductService<R, D, I>>;

/// Create the products router
pub fn router<R, D, I>(service: ProductService<R, D, I>) -> Router
where
    R: ProductRepository + 'static,
    D: DetailRepository + 'static,
    I: ImageStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/product", post(create_product))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/statistics", get(get_statistics))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(shared_service)
}

/// List active products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "Products with their category and supplier", body = ApiResponse<Vec<Product>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_products<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
    Query(params): Query<ListParams>,
) -> ProductResult<ApiResponse<Vec<Product>>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    let products = service.list_products(&params).await?;
    Ok(ApiResponse::list(products))
}

/// Get a product merged with its detail document
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id (MaHangHoa)")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductView>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No active product with this id", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
async fn get_product<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiResponse<ProductView>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    let product = service.get_product(id).await?;
    Ok(ApiResponse::ok(product))
}

/// Create a product from a multipart form with an optional `image` file
#[utoipa::path(
    post,
    path = "/product",
    tag = "Products",
    request_body(content = ProductFormBody, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<CreatedProduct>),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
async fn create_product<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
    form: ProductForm,
) -> ProductResult<ApiResponse<CreatedProduct>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    let created = service.create_product(form).await?;
    Ok(ApiResponse::ok(created)
        .with_message("Product created successfully")
        .created())
}

/// Replace a product's fields; a new `image` replaces every previous image
#[utoipa::path(
    put,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id (MaHangHoa)")),
    request_body(content = ProductFormBody, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<UpdatedProduct>),
        (status = 400, description = "Invalid id or form", body = ErrorResponse),
        (status = 404, description = "No active product with this id", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
async fn update_product<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
    IdPath(id): IdPath,
    form: ProductForm,
) -> ProductResult<ApiResponse<UpdatedProduct>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    let updated = service.update_product(id, form).await?;
    Ok(ApiResponse::ok(updated).with_message("Product updated successfully"))
}

/// Soft-delete a product after removing its images and detail document
#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id (MaHangHoa)")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No active product with this id", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
async fn delete_product<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiResponse<()>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    service.delete_product(id).await?;
    Ok(ApiResponse::message("Product deleted successfully"))
}

/// Per-region product aggregates plus detail document totals
#[utoipa::path(
    get,
    path = "/statistics",
    tag = "Products",
    responses(
        (status = 200, description = "Statistics", body = ApiResponse<Statistics>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
async fn get_statistics<R, D, I>(
    State(service): State<SharedService<R, D, I>>,
) -> ProductResult<ApiResponse<Statistics>>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    let statistics = service.statistics().await?;
    Ok(ApiResponse::ok(statistics))
}
