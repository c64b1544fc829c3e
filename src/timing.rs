use std::collections::BTreeMap;
use std::future::Future;
use std::time::{Duration, Instant};

/// Elapsed seconds per phase label.
pub type TimingRecord = BTreeMap<String, f64>;

/// Durations collected for the phase currently being benchmarked.
///
/// The batch is owned by the caller and handed to each scenario; draining it
/// between scenarios keeps their timings apart.
#[derive(Debug, Default)]
pub struct TimingBatch {
    entries: BTreeMap<String, Duration>,
    quiet: bool,
}

impl TimingBatch {
    /// A batch that prints `[label]: seconds` for every recorded phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch that records without printing.
    pub fn quiet() -> Self {
        Self {
            entries: BTreeMap::new(),
            quiet: true,
        }
    }

    /// Awaits `work` and records how long it took under `label`.
    ///
    /// Only successful work is recorded; on error the batch is left as it was
    /// and the error is returned unchanged.
    pub async fn time<T, E, F>(&mut self, label: impl Into<String>, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let label = label.into();
        let start = Instant::now();
        let output = work.await?;
        self.record(label, start.elapsed());
        Ok(output)
    }

    /// Stores `elapsed` under `label`, replacing any earlier value.
    pub fn record(&mut self, label: impl Into<String>, elapsed: Duration) {
        let label = label.into();
        if !self.quiet {
            println!("[{}]: {:.6}", label, elapsed.as_secs_f64());
        }
        tracing::debug!(phase = %label, elapsed = ?elapsed, "recorded timing");
        self.entries.insert(label, elapsed);
    }

    pub fn get(&self, label: &str) -> Option<Duration> {
        self.entries.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current batch and starts a new, empty one.
    pub fn drain_batch(&mut self) -> TimingRecord {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(label, elapsed)| (label, elapsed.as_secs_f64()))
            .collect()
    }
}
