//! Repository implementations for database access.

pub mod bills;
pub mod members;
pub mod providers;
pub mod repository;
pub mod rooms;
pub mod users;

pub use bills::Bills;
pub use members::Members;
pub use providers::Providers;
pub use repository::Repository;
pub use rooms::Rooms;
pub use users::Users;
