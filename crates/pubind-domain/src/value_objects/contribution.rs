//! Deferred contribution lists

use std::fmt;
use std::sync::Arc;

/// Ordered set of discovered contributions of one capability.
///
/// Holds the discovery snapshot taken for a single build; the list handed
/// to a consumer is only materialized when [`ContributionList::contributions`]
/// is called, and a fresh `Vec` is produced on every call.
pub struct ContributionList<T: ?Sized> {
    snapshot: Arc<[Arc<T>]>,
}

impl<T: ?Sized> ContributionList<T> {
    /// Wrap a discovery snapshot
    pub fn new(snapshot: Vec<Arc<T>>) -> Self {
        Self {
            snapshot: snapshot.into(),
        }
    }

    /// A list with no contributions
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Materialize the contributions in discovery order
    pub fn contributions(&self) -> Vec<Arc<T>> {
        self.snapshot.iter().cloned().collect()
    }

    /// Iterate the contributions without materializing a list
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.snapshot.iter()
    }

    /// Number of contributions
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Whether nothing was contributed
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Whether both lists yield the same instances in the same order
    pub fn same_contributions(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl<T: ?Sized> Clone for ContributionList<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<T: ?Sized> Default for ContributionList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> fmt::Debug for ContributionList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContributionList")
            .field("len", &self.len())
            .finish()
    }
}
