//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the back-office API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nông Sản Back Office API",
        version = "0.1.0",
        description = "Products, catalog, customers, orders and warehouses of the agricultural retail chain",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_products::ApiDoc),
        (path = "/api", api = domain_catalog::ApiDoc),
        (path = "/api", api = domain_customers::ApiDoc),
        (path = "/api", api = domain_orders::ApiDoc),
        (path = "/api", api = domain_warehouses::ApiDoc)
    )
)]
pub struct ApiDoc;
