//! HTTP handlers for categories, suppliers and branches

use axum::{
    Router,
    extract::State,
    routing::{get, post, put},
};
use axum_helpers::{ApiResponse, ErrorResponse, IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Branch, Category, CategoryCreated, CategoryInput, Supplier, SupplierCreated, SupplierInput,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        update_category,
        delete_category,
        list_suppliers,
        create_supplier,
        update_supplier,
        delete_supplier,
        list_branches,
        get_branch,
    ),
    components(schemas(
        Category,
        CategoryInput,
        CategoryCreated,
        Supplier,
        SupplierInput,
        SupplierCreated,
        Branch,
        ErrorResponse
    )),
    tags(
        (name = "Catalog", description = "Categories, suppliers and branches")
    )
)]
pub struct ApiDoc;

/// Create the catalog router
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories", get(list_categories))
        .route("/category", post(create_category))
        .route(
            "/category/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/suppliers", get(list_suppliers))
        .route("/supplier", post(create_supplier))
        .route(
            "/supplier/{id}",
            put(update_supplier).delete(delete_supplier),
        )
        .route("/branches", get(list_branches))
        .route("/branch/{id}", get(get_branch))
        .with_state(shared_service)
}

/// List active categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Active categories, newest first", body = ApiResponse<Vec<Category>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_categories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<ApiResponse<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(ApiResponse::list(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    tag = "Catalog",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryCreated>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn create_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CatalogResult<ApiResponse<CategoryCreated>> {
    let id = service.create_category(input).await?;
    Ok(ApiResponse::ok(CategoryCreated { id })
        .with_message("Category created successfully")
        .created())
}

/// Update a category's name and type
#[utoipa::path(
    put,
    path = "/category/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Category id (MaDanhMuc)")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated"),
        (status = 400, description = "Invalid id or input", body = ErrorResponse),
        (status = 404, description = "No active category with this id", body = ErrorResponse)
    )
)]
async fn update_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CatalogResult<ApiResponse<()>> {
    service.update_category(id, input).await?;
    Ok(ApiResponse::message("Category updated successfully"))
}

/// Soft-delete a category that no active product uses
#[utoipa::path(
    delete,
    path = "/category/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Category id (MaDanhMuc)")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Invalid id, or the category still has products", body = ErrorResponse),
        (status = 404, description = "No active category with this id", body = ErrorResponse)
    )
)]
async fn delete_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<ApiResponse<()>> {
    service.delete_category(id).await?;
    Ok(ApiResponse::message("Category deleted successfully"))
}

/// List active suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "Catalog",
    responses(
        (status = 200, description = "Active suppliers, newest first", body = ApiResponse<Vec<Supplier>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_suppliers<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<ApiResponse<Vec<Supplier>>> {
    let suppliers = service.list_suppliers().await?;
    Ok(ApiResponse::list(suppliers))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/supplier",
    tag = "Catalog",
    request_body = SupplierInput,
    responses(
        (status = 201, description = "Supplier created", body = ApiResponse<SupplierCreated>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn create_supplier<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<SupplierInput>,
) -> CatalogResult<ApiResponse<SupplierCreated>> {
    let id = service.create_supplier(input).await?;
    Ok(ApiResponse::ok(SupplierCreated { id })
        .with_message("Supplier created successfully")
        .created())
}

/// Update a supplier's contact details
#[utoipa::path(
    put,
    path = "/supplier/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Supplier id (MaNhaCungCap)")),
    request_body = SupplierInput,
    responses(
        (status = 200, description = "Supplier updated"),
        (status = 400, description = "Invalid id or input", body = ErrorResponse),
        (status = 404, description = "No active supplier with this id", body = ErrorResponse)
    )
)]
async fn update_supplier<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<SupplierInput>,
) -> CatalogResult<ApiResponse<()>> {
    service.update_supplier(id, input).await?;
    Ok(ApiResponse::message("Supplier updated successfully"))
}

/// Soft-delete a supplier that no active product uses
#[utoipa::path(
    delete,
    path = "/supplier/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Supplier id (MaNhaCungCap)")),
    responses(
        (status = 200, description = "Supplier deleted"),
        (status = 400, description = "Invalid id, or the supplier still has products", body = ErrorResponse),
        (status = 404, description = "No active supplier with this id", body = ErrorResponse)
    )
)]
async fn delete_supplier<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<ApiResponse<()>> {
    service.delete_supplier(id).await?;
    Ok(ApiResponse::message("Supplier deleted successfully"))
}

/// List active branches
#[utoipa::path(
    get,
    path = "/branches",
    tag = "Catalog",
    responses(
        (status = 200, description = "Active branches, newest first", body = ApiResponse<Vec<Branch>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_branches<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<ApiResponse<Vec<Branch>>> {
    let branches = service.list_branches().await?;
    Ok(ApiResponse::list(branches))
}

/// Get one branch
#[utoipa::path(
    get,
    path = "/branch/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Branch id (MaChiNhanh)")),
    responses(
        (status = 200, description = "Branch found", body = ApiResponse<Branch>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No branch with this id", body = ErrorResponse)
    )
)]
async fn get_branch<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<ApiResponse<Branch>> {
    let branch = service.get_branch(id).await?;
    Ok(ApiResponse::ok(branch))
}
