//! # Collection Load Lifecycle
//!
//! A collection moves `Uninitialized → Loading → Ready | Error`, and a
//! user-triggered retry moves it back through `Loading`. Each load gets a
//! generation number; a completion carrying a stale generation is
//! discarded, so an old response can never overwrite a newer load.

use serde::{Deserialize, Serialize};

/// Where a collection is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    /// No load has been attempted.
    Uninitialized,
    /// A load is in flight.
    Loading,
    /// The last load succeeded; `records` mirrors the store.
    Ready,
    /// The last load failed; `records` holds fallback data (possibly
    /// empty) and `error` says what went wrong.
    Error,
}

/// One user-scoped collection plus its load state.
#[derive(Debug, Clone)]
pub struct CollectionState<R> {
    status: CollectionStatus,
    records: Vec<R>,
    error: Option<String>,
    generation: u64,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            status: CollectionStatus::Uninitialized,
            records: Vec::new(),
            error: None,
            generation: 0,
        }
    }
}

impl<R> CollectionState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CollectionStatus {
        self.status
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<R> {
        &mut self.records
    }

    /// The last load error, if the collection is in its error state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Begin a load. Bumps the generation and returns it; the records
    /// already present stay visible while the load is in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = CollectionStatus::Loading;
        self.error = None;
        self.generation
    }

    /// Complete the load started with `generation`. Returns `false` (and
    /// changes nothing) when a newer load has started since.
    pub fn complete_load(&mut self, generation: u64, records: Vec<R>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = CollectionStatus::Ready;
        self.records = records;
        self.error = None;
        true
    }

    /// Fail the load started with `generation`, parking the collection in
    /// its error state with `fallback` records. Returns `false` when a
    /// newer load has started since.
    pub fn fail_load(&mut self, generation: u64, error: String, fallback: Vec<R>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = CollectionStatus::Error;
        self.records = fallback;
        self.error = Some(error);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_moves_through_loading_to_ready() {
        let mut state = CollectionState::new();
        assert_eq!(state.status(), CollectionStatus::Uninitialized);

        let generation = state.begin_load();
        assert_eq!(state.status(), CollectionStatus::Loading);

        assert!(state.complete_load(generation, vec![1, 2, 3]));
        assert_eq!(state.status(), CollectionStatus::Ready);
        assert_eq!(state.records(), &[1, 2, 3]);
        assert!(state.error().is_none());
    }

    #[test]
    fn failed_load_keeps_fallback_and_error() {
        let mut state = CollectionState::new();
        let generation = state.begin_load();
        assert!(state.fail_load(generation, "store down".to_string(), vec![9]));
        assert_eq!(state.status(), CollectionStatus::Error);
        assert_eq!(state.records(), &[9]);
        assert_eq!(state.error(), Some("store down"));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = CollectionState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        // The older load finishing late must not clobber the newer one.
        assert!(!state.complete_load(first, vec![1]));
        assert_eq!(state.status(), CollectionStatus::Loading);

        assert!(state.complete_load(second, vec![2]));
        assert_eq!(state.records(), &[2]);
    }

    #[test]
    fn retry_after_failure_clears_the_error() {
        let mut state = CollectionState::<u8>::new();
        let generation = state.begin_load();
        state.fail_load(generation, "boom".to_string(), Vec::new());

        let retry = state.begin_load();
        assert_eq!(state.status(), CollectionStatus::Loading);
        assert!(state.error().is_none());
        assert!(state.complete_load(retry, vec![7]));
        assert_eq!(state.status(), CollectionStatus::Ready);
    }
}
