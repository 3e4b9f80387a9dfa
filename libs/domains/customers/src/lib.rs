//! Customers Domain
//!
//! Customer records with search over name and phone, the nearest branch name
//! joined in, and a hard delete that is refused while the customer has orders.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sort;

pub use error::{CustomerError, CustomerResult};
pub use handlers::ApiDoc;
pub use models::{Customer, CustomerCreated, DEFAULT_CUSTOMER_TYPE, NewCustomer, UpdateCustomer};
pub use postgres::PgCustomerRepository;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use service::CustomerService;
pub use sort::CustomerSort;
