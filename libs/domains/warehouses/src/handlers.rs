use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post, put},
};
use axum_helpers::{ApiResponse, ErrorResponse, IdPath, ValidatedJson};
use list_query::RegionParams;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::WarehouseResult;
use crate::models::{
    InventoryItem, NewWarehouse, UpdateStock, UpdateWarehouse, Warehouse, WarehouseCreated,
};
use crate::repository::WarehouseRepository;
use crate::service::WarehouseService;

/// OpenAPI documentation for warehouse and inventory endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_warehouses,
        get_warehouse,
        create_warehouse,
        update_warehouse,
        delete_warehouse,
        list_inventory,
        update_inventory,
    ),
    components(schemas(
        Warehouse,
        NewWarehouse,
        UpdateWarehouse,
        WarehouseCreated,
        InventoryItem,
        UpdateStock,
        ErrorResponse
    )),
    tags(
        (name = "Warehouses", description = "Warehouses and stock levels")
    )
)]
pub struct ApiDoc;

/// Create the warehouse router
pub fn router<R: WarehouseRepository + 'static>(service: WarehouseService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/warehouses", get(list_warehouses))
        .route("/warehouse", post(create_warehouse))
        .route(
            "/warehouse/{id}",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route("/inventory", get(list_inventory))
        .route("/inventory/{id}", put(update_inventory))
        .with_state(shared_service)
}

/// List active warehouses
#[utoipa::path(
    get,
    path = "/warehouses",
    tag = "Warehouses",
    responses(
        (status = 200, description = "Active warehouses with branch name and region", body = ApiResponse<Vec<Warehouse>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_warehouses<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
) -> WarehouseResult<ApiResponse<Vec<Warehouse>>> {
    let warehouses = service.list_warehouses().await?;
    Ok(ApiResponse::list(warehouses))
}

/// Get an active warehouse
#[utoipa::path(
    get,
    path = "/warehouse/{id}",
    tag = "Warehouses",
    params(("id" = i32, Path, description = "Warehouse id (MaKho)")),
    responses(
        (status = 200, description = "Warehouse found", body = ApiResponse<Warehouse>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    )
)]
async fn get_warehouse<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    IdPath(id): IdPath,
) -> WarehouseResult<ApiResponse<Warehouse>> {
    let warehouse = service.get_warehouse(id).await?;
    Ok(ApiResponse::ok(warehouse))
}

/// Open a warehouse under a branch
#[utoipa::path(
    post,
    path = "/warehouse",
    tag = "Warehouses",
    request_body = NewWarehouse,
    responses(
        (status = 201, description = "Warehouse created", body = ApiResponse<WarehouseCreated>),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
async fn create_warehouse<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    ValidatedJson(input): ValidatedJson<NewWarehouse>,
) -> WarehouseResult<ApiResponse<WarehouseCreated>> {
    let id = service.create_warehouse(input).await?;
    Ok(ApiResponse::ok(WarehouseCreated { id })
        .with_message("Warehouse created successfully")
        .created())
}

/// Update a warehouse's name, address, manager and capacity
#[utoipa::path(
    put,
    path = "/warehouse/{id}",
    tag = "Warehouses",
    params(("id" = i32, Path, description = "Warehouse id (MaKho)")),
    request_body = UpdateWarehouse,
    responses(
        (status = 200, description = "Warehouse updated"),
        (status = 400, description = "Invalid id or input", body = ErrorResponse),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    )
)]
async fn update_warehouse<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateWarehouse>,
) -> WarehouseResult<ApiResponse<()>> {
    service.update_warehouse(id, input).await?;
    Ok(ApiResponse::message("Warehouse updated successfully"))
}

/// Remove a warehouse's stock and soft-delete it
#[utoipa::path(
    delete,
    path = "/warehouse/{id}",
    tag = "Warehouses",
    params(("id" = i32, Path, description = "Warehouse id (MaKho)")),
    responses(
        (status = 200, description = "Warehouse deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Warehouse not found", body = ErrorResponse)
    )
)]
async fn delete_warehouse<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    IdPath(id): IdPath,
) -> WarehouseResult<ApiResponse<()>> {
    service.delete_warehouse(id).await?;
    Ok(ApiResponse::message("Warehouse deleted successfully"))
}

/// List stock in active warehouses
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "Warehouses",
    params(RegionParams),
    responses(
        (status = 200, description = "Stock levels, most recently updated first", body = ApiResponse<Vec<InventoryItem>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_inventory<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    Query(params): Query<RegionParams>,
) -> WarehouseResult<ApiResponse<Vec<InventoryItem>>> {
    let items = service.list_inventory(&params).await?;
    Ok(ApiResponse::list(items))
}

/// Set the stock quantity of one inventory record
#[utoipa::path(
    put,
    path = "/inventory/{id}",
    tag = "Warehouses",
    params(("id" = i32, Path, description = "Inventory id (MaTonKho)")),
    request_body = UpdateStock,
    responses(
        (status = 200, description = "Stock updated"),
        (status = 400, description = "Invalid id or quantity", body = ErrorResponse),
        (status = 404, description = "Inventory record not found", body = ErrorResponse)
    )
)]
async fn update_inventory<R: WarehouseRepository>(
    State(service): State<Arc<WarehouseService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateStock>,
) -> WarehouseResult<ApiResponse<()>> {
    service.update_stock(id, input.quantity).await?;
    Ok(ApiResponse::message("Inventory updated successfully"))
}
