pub mod error;
pub mod health;
pub mod idle_monitor;
pub mod logger;
pub mod messages;
pub mod routes;


pub use crate::error::{Result, ServerError};
pub use crate::idle_monitor::spawn_idle_monitor;
pub use crate::routes::build_router;
