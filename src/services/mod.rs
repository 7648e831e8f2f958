pub mod auth_service;
pub mod family_service;

pub use auth_service::*;
pub use family_service::*;
