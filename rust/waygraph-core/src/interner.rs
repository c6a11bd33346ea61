use std::sync::Arc;

use rustc_hash::FxHashSet;

/// Shared, immutable description blob.
pub type Desc = Arc<[u8]>;

/// Canonicalizes byte-equal description blobs to one shared allocation.
///
/// Way and node descriptions repeat heavily across a loaded region; interning
/// keeps a single copy alive no matter how many links reference it.
#[derive(Debug, Default)]
pub struct DescriptionInterner {
    table: FxHashSet<Desc>,
}

impl DescriptionInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical shared instance for `bytes`, inserting on first sight.
    pub fn unify(&mut self, bytes: &[u8]) -> Desc {
        if let Some(existing) = self.table.get(bytes) {
            return Arc::clone(existing);
        }
        let desc: Desc = Arc::from(bytes);
        self.table.insert(Arc::clone(&desc));
        desc
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
