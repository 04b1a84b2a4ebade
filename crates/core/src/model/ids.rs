use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a game instance inside a language's content pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceIndex(u32);

impl InstanceIndex {
    /// Creates a new `InstanceIndex`
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Monotonic token identifying one acquisition cycle.
///
/// `Generation::default()` means no acquisition has started yet.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    /// Creates a new `Generation`
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for InstanceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceIndex({})", self.0)
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for InstanceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_starts_at_zero_and_advances() {
        let first = Generation::default();
        assert_eq!(first.value(), 0);
        assert_eq!(first.next(), Generation::new(1));
        assert!(first.next() > first);
    }

    #[test]
    fn generation_saturates() {
        assert_eq!(Generation::new(u64::MAX).next().value(), u64::MAX);
    }

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(InstanceIndex::new(7).to_string(), "7");
        assert_eq!(format!("{:?}", InstanceIndex::new(7)), "InstanceIndex(7)");
    }
}
