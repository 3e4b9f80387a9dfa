use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{ApiResponse, ErrorResponse, IdPath, ValidatedJson};
use list_query::ListParams;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CustomerResult;
use crate::models::{Customer, CustomerCreated, NewCustomer, UpdateCustomer};
use crate::repository::CustomerRepository;
use crate::service::CustomerService;

/// OpenAPI documentation for the customer endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_customers,
        get_customer,
        create_customer,
        update_customer,
        delete_customer,
    ),
    components(schemas(Customer, NewCustomer, UpdateCustomer, CustomerCreated, ErrorResponse)),
    tags(
        (name = "Customers", description = "Customer records")
    )
)]
pub struct ApiDoc;

/// Create the customer router
pub fn router<R: CustomerRepository + 'static>(service: CustomerService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/customers", get(list_customers))
        .route("/customer", post(create_customer))
        .route(
            "/customer/{id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .with_state(shared_service)
}

/// List customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    params(ListParams),
    responses(
        (status = 200, description = "Customers with their nearest branch", body = ApiResponse<Vec<Customer>>),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
async fn list_customers<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    Query(params): Query<ListParams>,
) -> CustomerResult<ApiResponse<Vec<Customer>>> {
    let customers = service.list_customers(&params).await?;
    Ok(ApiResponse::list(customers))
}

/// Get a customer by id
#[utoipa::path(
    get,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id (MaKhachHang)")),
    responses(
        (status = 200, description = "Customer found", body = ApiResponse<Customer>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn get_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
) -> CustomerResult<ApiResponse<Customer>> {
    let customer = service.get_customer(id).await?;
    Ok(ApiResponse::ok(customer))
}

/// Register a customer
#[utoipa::path(
    post,
    path = "/customer",
    tag = "Customers",
    request_body = NewCustomer,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerCreated>),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
async fn create_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    ValidatedJson(input): ValidatedJson<NewCustomer>,
) -> CustomerResult<ApiResponse<CustomerCreated>> {
    let id = service.create_customer(input).await?;
    Ok(ApiResponse::ok(CustomerCreated { id })
        .with_message("Customer created successfully")
        .created())
}

/// Update a customer's contact details and type
#[utoipa::path(
    put,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id (MaKhachHang)")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated"),
        (status = 400, description = "Invalid id or input", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn update_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CustomerResult<ApiResponse<()>> {
    service.update_customer(id, input).await?;
    Ok(ApiResponse::message("Customer updated successfully"))
}

/// Delete a customer without orders
#[utoipa::path(
    delete,
    path = "/customer/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id (MaKhachHang)")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 400, description = "Invalid id, or the customer has orders", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn delete_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
) -> CustomerResult<ApiResponse<()>> {
    service.delete_customer(id).await?;
    Ok(ApiResponse::message("Customer deleted successfully"))
}
