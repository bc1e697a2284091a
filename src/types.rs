//! Common type definitions.
//!
//! All entity IDs are server-assigned integer identities (`BIGSERIAL` in the
//! schema) wrapped in type aliases:
//!
//! - [`UserId`]: identity record
//! - [`RoomId`]: shared ledger context
//! - [`ProviderId`]: billing-source record
//! - [`MemberId`]: room participant
//! - [`BillId`]: a bill inside a room
//! - [`ShareId`]: a member's slice of a bill

pub type UserId = i64;
pub type RoomId = i64;
pub type ProviderId = i64;
pub type MemberId = i64;
pub type BillId = i64;
pub type ShareId = i64;
