//! Parallel job processing utilities.

use anyhow::{Result, bail};
use log::error;
use rayon::prelude::*;

/// Result of a parallel batch operation.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    /// Tally `results`, logging each failure.
    pub fn from_results<R>(results: &[Result<R>]) -> Self {
        let mut batch = Self::default();
        for r in results {
            if let Err(e) = r {
                error!("{e:?}");
                batch.failed += 1;
            } else {
                batch.succeeded += 1;
            }
        }
        batch
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if !self.all_succeeded() {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Run `op` on every item in parallel, keeping results in item order.
pub fn collect_parallel<T, R, F>(items: &[T], op: F) -> Vec<Result<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    items.par_iter().map(op).collect()
}
