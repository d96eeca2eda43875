//! UUIDv7 helpers.
//!
//! All rows created by this workspace use UUIDv7 primary keys so that ids
//! sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 (time-ordered).
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}
