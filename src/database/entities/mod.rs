pub mod persons;
pub mod relationships;
pub mod user_sessions;
pub mod users;

pub use persons::*;
pub use relationships::*;
pub use user_sessions::*;
pub use users::*;
