//! Presence-aware field values.

/// A single field of an untrusted payload, as seen by the merge policy.
///
/// Distinguishes a key that was never sent from a key sent as `null`, which a
/// plain `Option` cannot express.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// The key is not in the payload.
    #[default]
    Absent,
    /// The key is present with a `null` value.
    Null,
    /// The key is present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns true when the payload contains the key at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Patch::Absent)
    }

    /// Converts a present value into an `Option`, `None` for null.
    ///
    /// Returns `None` for an absent key as well; callers that care about the
    /// difference should check [`Patch::is_present`] first.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Absent | Patch::Null => None,
        }
    }

    /// Overwrites `slot` when the key is present, leaving it untouched otherwise.
    pub fn apply_to(self, slot: &mut Option<T>) {
        if self.is_present() {
            *slot = self.into_option();
        }
    }
}

impl Patch<String> {
    /// Like [`Patch::apply_to`] for a non-optional string; `null` empties it.
    pub fn apply_to_required(self, slot: &mut String) {
        if self.is_present() {
            *slot = self.into_option().unwrap_or_default();
        }
    }
}
