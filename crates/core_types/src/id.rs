//! Identifier for canvas elements.
//!
//! Plain `u64` so the editing crates stay independent of however the host stores its
//! template documents.

/// Opaque identifier for an element on the designer canvas.
///
/// Copyable handle; the value carries no meaning beyond identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<ElementId> for u64 {
    #[inline]
    fn from(id: ElementId) -> Self {
        id.as_raw()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn element_id_round_trip() {
        let id = ElementId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(ElementId::from(42u64), id);
    }

    #[test]
    fn element_id_hash_dedupes() {
        let mut set = HashSet::new();
        set.insert(ElementId::from_raw(1));
        set.insert(ElementId::from_raw(2));
        set.insert(ElementId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId::from_raw(9).to_string(), "#9");
    }
}
