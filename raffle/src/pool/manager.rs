//! Participant registry and draw-eligible pool.

use std::{collections::HashSet, sync::Arc};

use super::models::{Origin, Participant, ParticipantId};

/// Registry of every admitted participant plus the subset still eligible
/// to win in the current super-round.
///
/// Every mutation updates both collections in a single call, so
/// `available` is always a duplicate-free subset of `all`.
#[derive(Debug, Default)]
pub struct ParticipantPool {
    /// Every participant ever admitted, in admission order.
    all: Vec<Arc<Participant>>,

    /// Participants still eligible in this super-round, in admission order.
    available: Vec<Arc<Participant>>,

    /// Ids present in `all`.
    ids: HashSet<ParticipantId>,

    /// Normalized display names of import-origin entries in `all`.
    display_names: HashSet<String>,
}

impl ParticipantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of candidates into the registry.
    ///
    /// A candidate is skipped if its id is already registered (or appeared
    /// earlier in the batch). Import candidates are also skipped when their
    /// normalized display name matches an earlier import; registrations
    /// never block or get blocked by a display name. Admitted participants
    /// are appended to both the registry and the available pool.
    ///
    /// # Returns
    ///
    /// * `usize` - Number of participants actually admitted. Zero means
    ///   the batch held nothing new.
    pub fn merge<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = Participant>,
    {
        let mut admitted = 0;

        for candidate in candidates {
            if self.ids.contains(&candidate.id) {
                continue;
            }

            if candidate.origin == Origin::Import {
                let name_key = candidate.normalized_display_name();
                if !self.display_names.insert(name_key) {
                    continue;
                }
            }

            self.ids.insert(candidate.id.clone());

            let participant = Arc::new(candidate);
            self.all.push(Arc::clone(&participant));
            self.available.push(participant);
            admitted += 1;
        }

        if admitted > 0 {
            log::debug!(
                "Merged {} participant(s): registry {}, available {}",
                admitted,
                self.all.len(),
                self.available.len()
            );
        }
        self.debug_check_invariants();

        admitted
    }

    /// Remove a participant from the available pool.
    ///
    /// Removing an absent id is a no-op, so repeated calls change state
    /// at most once.
    ///
    /// # Returns
    ///
    /// * `bool` - Whether the participant was removed
    pub fn remove_from_available(&mut self, id: &ParticipantId) -> bool {
        let Some(idx) = self.available.iter().position(|p| &p.id == id) else {
            return false;
        };

        self.available.remove(idx);
        self.debug_check_invariants();
        true
    }

    /// Make every registered participant eligible again.
    pub fn reset_available(&mut self) {
        self.available = self.all.clone();
        self.debug_check_invariants();
    }

    pub fn all(&self) -> &[Arc<Participant>] {
        &self.all
    }

    pub fn available(&self) -> &[Arc<Participant>] {
        &self.available
    }

    pub fn registry_len(&self) -> usize {
        self.all.len()
    }

    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_available(&self, id: &ParticipantId) -> bool {
        self.available.iter().any(|p| &p.id == id)
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Arc<Participant>> {
        self.all.iter().find(|p| &p.id == id)
    }

    /// Check `available ⊆ all` with no duplicate ids.
    pub fn check_invariants(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.available.len());
        self.all.len() == self.ids.len()
            && self
                .available
                .iter()
                .all(|p| self.ids.contains(&p.id) && seen.insert(&p.id))
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.check_invariants(), "participant pool invariant violated");
    }
}
