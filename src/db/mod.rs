//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over
//! database operations.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations per table
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Sessions
//!
//! Repositories are constructed over a `&mut PgConnection` acquired from the
//! shared pool for the scope of one request. Pool guards and transactions
//! release the underlying connection on every exit path, so session lifetime
//! is bounded by the caller's scope.
//!
//! ```ignore
//! let mut conn = pool.acquire().await?;
//! let mut rooms = Rooms::new(&mut conn);
//! let all = rooms.list().await?;
//! ```
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory; [`crate::migrator`] runs them at process start.

pub mod errors;
pub mod handlers;
pub mod models;
