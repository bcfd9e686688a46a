//! Asynchronous snapshot loading state management.

/// Holds the state of an async snapshot loading operation.
///
/// Only the in-progress flag and the request it belongs to are shared;
/// results come through a channel. Wrapped in an `Arc<Mutex<>>` so the main
/// thread and the loading thread can both reach it.
pub struct LoadingState {
    /// True if a loading operation is currently in progress
    pub in_progress: bool,
    /// Request the in-progress flag belongs to
    pub request: u64,
}

impl LoadingState {
    /// Creates a new loading state that is not in progress.
    pub fn new() -> Self {
        Self {
            in_progress: false,
            request: 0,
        }
    }

    /// Marks `request` as the active load.
    pub fn begin(&mut self, request: u64) {
        self.in_progress = true;
        self.request = request;
    }

    /// Clears the flag if `request` is still the active load.
    pub fn finish(&mut self, request: u64) {
        if self.request == request {
            self.in_progress = false;
        }
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_request_does_not_clear_flag() {
        let mut state = LoadingState::new();
        state.begin(1);
        state.begin(2);

        state.finish(1);
        assert!(state.in_progress);

        state.finish(2);
        assert!(!state.in_progress);
    }
}
