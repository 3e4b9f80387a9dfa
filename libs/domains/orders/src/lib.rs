//! Orders Domain
//!
//! Orders are identified by UUID and carry their lines in a separate table.
//! The total is computed from the lines when the order is placed. Deletes are
//! hard: lines first, then the order, inside one transaction.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sort;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    DEFAULT_ORDER_STATUS, NewOrder, NewOrderLine, OrderCreated, OrderCustomer, OrderDetail,
    OrderLine, OrderSummary, UpdateOrderStatus,
};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
pub use sort::OrderSort;
