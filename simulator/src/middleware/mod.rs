mod auth;
mod script;

pub use auth::*;
pub use script::*;
