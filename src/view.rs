/// Chart view state with a stale-response guard.
///
/// Every chart query draws a generation number before its fetches start; a
/// finished query commits its result only while its generation is still the
/// latest one issued. A completion for a superseded selection is discarded so
/// it can never overwrite newer view state, no matter what order responses
/// land in.
#[derive(Debug, Default)]
pub struct ViewState {
    latest: u64,
    committed: Option<(u64, serde_json::Value)>,
}

impl ViewState {
    /// Start a new query, superseding any still in flight.
    pub fn begin_query(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Commit a finished query's result. Returns false (and keeps the prior
    /// state intact) when the generation has been superseded.
    pub fn commit(&mut self, generation: u64, result: serde_json::Value) -> bool {
        if generation != self.latest {
            tracing::debug!(generation, latest = self.latest, "discarding stale query result");
            return false;
        }
        self.committed = Some((generation, result));
        true
    }

    /// The most recently committed result, if any.
    pub fn current(&self) -> Option<&serde_json::Value> {
        self.committed.as_ref().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.committed = None;
    }
}
