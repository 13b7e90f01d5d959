//! Ordered store of search capsules with a single active selection.
//!
//! Invariant at every observable point: `active` is `None` iff there are no
//! capsules, otherwise it indexes an existing capsule.

use tatva_types::capsule::SearchCapsule;
use tatva_types::error::SessionError;

/// Append-only list of capsules for one session.
#[derive(Debug, Default)]
pub struct SessionStore {
    capsules: Vec<SearchCapsule>,
    active: Option<usize>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capsule at the end and make it active. Returns its index.
    pub fn append(&mut self, capsule: SearchCapsule) -> usize {
        self.capsules.push(capsule);
        let index = self.capsules.len() - 1;
        self.active = Some(index);
        index
    }

    /// Make the capsule at `index` active.
    ///
    /// Fails with [`SessionError::OutOfRange`] and leaves the selection
    /// unchanged when `index` is not a valid position.
    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.capsules.len() {
            return Err(SessionError::OutOfRange {
                index,
                len: self.capsules.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }

    /// Drop every capsule and the selection.
    pub fn clear(&mut self) {
        self.capsules.clear();
        self.active = None;
    }

    pub fn active(&self) -> Option<&SearchCapsule> {
        self.active.and_then(|i| self.capsules.get(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn capsules(&self) -> &[SearchCapsule] {
        &self.capsules
    }

    pub fn get(&self, index: usize) -> Option<&SearchCapsule> {
        self.capsules.get(index)
    }

    pub fn len(&self) -> usize {
        self.capsules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capsules.is_empty()
    }
}
