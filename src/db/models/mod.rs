//! Database record structures matching table schemas.

pub mod bills;
pub mod members;
pub mod providers;
pub mod rooms;
pub mod users;
