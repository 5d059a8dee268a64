mod auth_handlers;
mod device_handlers;
mod handlers;
pub mod router;

pub use router::create_router;
