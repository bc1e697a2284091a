//! Request/response shape definitions for the HTTP surface.
//!
//! Every request type carries an explicit `validate()` returning the failed
//! fields; constraints are data on typed structs, not reflection-driven
//! runtime checks.

pub mod bills;
pub mod members;
pub mod providers;
pub mod rooms;
pub mod tasks;
pub mod users;
