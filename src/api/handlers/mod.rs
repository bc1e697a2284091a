//! HTTP handler modules, one per resource.

pub mod bills;
pub mod members;
pub mod providers;
pub mod rooms;
pub mod tasks;
pub mod users;
