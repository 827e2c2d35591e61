use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one registered field instance.
///
/// Minted once per registration and stable for the lifetime of that
/// registration. Not derived from the field path: two registrations may
/// target the same path at the same time and still get distinct ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FieldId(u64);

impl FieldId {
    /// Mint a new process-unique id. Ids increase monotonically, so ordering
    /// by id is ordering by registration.
    pub fn next() -> Self {
        Self(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}
