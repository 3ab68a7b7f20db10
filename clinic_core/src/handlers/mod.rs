pub mod appointments;
pub mod contact;
pub mod diagnostics;
pub mod routes;

pub use routes::create_routes;
