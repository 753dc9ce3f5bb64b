//! Typed identifiers for harness objects.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter shared by every id type.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier tagged with the kind of object it names.
///
/// Ids are never reused within a process, so a helper rebuilt from scratch
/// always compares unequal to the one it replaced.
pub struct Id<T> {
    raw: u64,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Allocate a fresh id.
    #[inline]
    pub fn next() -> Self {
        Self {
            raw: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            _kind: PhantomData,
        }
    }

    /// Get the raw value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.raw
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_ids_are_unique() {
        let a = Id::<Marker>::next();
        let b = Id::<Marker>::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn test_copies_compare_equal() {
        let a = Id::<Marker>::next();
        let b = a;
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), a.value().to_string());
    }
}
