//! Child-to-parent notifications and the refresh token
//!
//! Children never mutate session state directly. They hand a `SessionEvent`
//! back to the session, which owns the authoritative state and reacts.

/// Opaque change-detection token
///
/// Only equality is meaningful. Any change of value means "something
/// changed, refetch"; the magnitude carries no information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to a value different from every earlier one
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Notification emitted by a child controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A photo was stored by the backend for this album
    PhotoUploaded { album_id: String, filename: String },
}
