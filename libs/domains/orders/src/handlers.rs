use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{ApiResponse, ErrorResponse, UuidPath, ValidatedJson};
use list_query::ListParams;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    NewOrder, NewOrderLine, OrderCreated, OrderCustomer, OrderDetail, OrderLine, OrderSummary,
    UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the order endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_orders, get_order, create_order, update_order, delete_order),
    components(schemas(
        OrderSummary,
        OrderDetail,
        OrderCustomer,
        OrderLine,
        NewOrder,
        NewOrderLine,
        UpdateOrderStatus,
        OrderCreated,
        ErrorResponse
    )),
    tags(
        (name = "Orders", description = "Customer orders and their lines")
    )
)]
pub struct ApiDoc;

/// Create the order router
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/orders", get(list_orders))
        .route("/order", post(create_order))
        .route(
            "/order/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(shared_service)
}

/// List orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(ListParams),
    responses(
        (status = 200, description = "Orders with customer and branch names", body = ApiResponse<Vec<OrderSummary>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Query(params): Query<ListParams>,
) -> OrderResult<ApiResponse<Vec<OrderSummary>>> {
    let orders = service.list_orders(&params).await?;
    Ok(ApiResponse::list(orders))
}

/// Get an order with its customer and lines
#[utoipa::path(
    get,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = uuid::Uuid, Path, description = "Order id (MaDonHang)")),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<OrderDetail>),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<ApiResponse<OrderDetail>> {
    let order = service.get_order(id).await?;
    Ok(ApiResponse::ok(order))
}

/// Place an order
#[utoipa::path(
    post,
    path = "/order",
    tag = "Orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderCreated>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<NewOrder>,
) -> OrderResult<ApiResponse<OrderCreated>> {
    let id = service.create_order(input).await?;
    Ok(ApiResponse::ok(OrderCreated { id })
        .with_message("Order created successfully")
        .created())
}

/// Change an order's status
#[utoipa::path(
    put,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = uuid::Uuid, Path, description = "Order id (MaDonHang)")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Invalid UUID or input", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<ApiResponse<()>> {
    service.update_status(id, input.status).await?;
    Ok(ApiResponse::message("Order updated successfully"))
}

/// Delete an order and its lines
#[utoipa::path(
    delete,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = uuid::Uuid, Path, description = "Order id (MaDonHang)")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<ApiResponse<()>> {
    service.delete_order(id).await?;
    Ok(ApiResponse::message("Order deleted successfully"))
}
