use std::time::Instant;

/// Counters shown under the chart. Zeroed on a new array and on reset,
/// only ever increased while a sort runs.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    comparisons: u64,
    swaps: u64,
    array_accesses: u64,
    started: Option<Instant>,
    finished: Option<Instant>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub comparisons: u64,
    pub swaps: u64,
    pub array_accesses: u64,
    pub elapsed_ms: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.finished = None;
    }

    pub fn finish(&mut self, now: Instant) {
        if self.started.is_some() {
            self.finished = Some(now);
        }
    }

    pub fn record_comparison(&mut self, accesses: u64) {
        self.comparisons += 1;
        self.array_accesses += accesses;
    }

    pub fn record_swap(&mut self, accesses: u64) {
        self.swaps += 1;
        self.array_accesses += accesses;
    }

    pub fn record_access(&mut self, accesses: u64) {
        self.array_accesses += accesses;
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn array_accesses(&self) -> u64 {
        self.array_accesses
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        match self.started {
            Some(start) => {
                let end = self.finished.unwrap_or(now);
                end.saturating_duration_since(start).as_millis() as u64
            }
            None => 0,
        }
    }

    pub fn snapshot(&self, now: Instant) -> StatsSnapshot {
        StatsSnapshot {
            comparisons: self.comparisons,
            swaps: self.swaps,
            array_accesses: self.array_accesses,
            elapsed_ms: self.elapsed_ms(now),
        }
    }
}
