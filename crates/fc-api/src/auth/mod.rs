pub mod email;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

pub use middleware::Caller;
pub use routes::routes;
