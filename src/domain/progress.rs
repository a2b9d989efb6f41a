use std::time::Instant;

use log::info;

const LOG_EVERY: usize = 10;

/// Counts tournaments as they come back from the source or the raw cache.
pub struct FetchProgress {
    total: usize,
    from_network: usize,
    from_cache: usize,
    started: Instant,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            from_network: 0,
            from_cache: 0,
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, was_cached: bool) {
        if was_cached {
            self.from_cache += 1;
        } else {
            self.from_network += 1;
        }

        let done = self.done();
        if done % LOG_EVERY == 0 || done == self.total {
            info!(
                "  → Progress: {}/{} ({} fetched, {} from cache, {:.1}s)",
                done,
                self.total,
                self.from_network,
                self.from_cache,
                self.started.elapsed().as_secs_f64()
            );
        }
    }

    pub fn done(&self) -> usize {
        self.from_network + self.from_cache
    }

    pub fn fetched(&self) -> usize {
        self.from_network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut progress = FetchProgress::new(3);
        progress.record(true);
        progress.record(false);
        progress.record(false);
        assert_eq!(progress.done(), 3);
        assert_eq!(progress.fetched(), 2);
    }
}
