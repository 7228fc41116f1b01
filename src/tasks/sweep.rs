//! TTL Sweep Task
//!
//! Local background task that periodically removes expired cache entries.
//!
//! Everything runs on one thread: the target lives in `Rc<RefCell<_>>` and the
//! task is spawned with `spawn_local`, so it must be started inside a
//! [`tokio::task::LocalSet`]. The borrow is released before every await.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::analysis::AnalysisCache;
use crate::cache::{Clock, TtlCache};
use crate::feedback::FeedbackStore;

// == Sweepable ==
/// Anything holding entries that can expire.
pub trait Sweepable {
    /// Removes expired entries, returning how many were dropped.
    fn sweep_expired(&mut self) -> usize;
}

impl<V, C: Clock> Sweepable for TtlCache<V, C> {
    fn sweep_expired(&mut self) -> usize {
        TtlCache::sweep_expired(self)
    }
}

impl<C: Clock> Sweepable for AnalysisCache<C> {
    fn sweep_expired(&mut self) -> usize {
        AnalysisCache::sweep_expired(self)
    }
}

impl<C: Clock> Sweepable for FeedbackStore<C> {
    fn sweep_expired(&mut self) -> usize {
        self.analysis_cache_mut().sweep_expired()
    }
}

// == Sweep Handle ==
/// Owns a running sweep task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct SweepHandle {
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Stops the sweep. Safe to call more than once.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a local task that sweeps `target` every `interval`.
///
/// The first sweep runs one full interval after spawning.
///
/// # Panics
/// Panics if called outside a `LocalSet`.
///
/// # Example
/// ```ignore
/// let local = tokio::task::LocalSet::new();
/// local.run_until(async {
///     let cache = Rc::new(RefCell::new(TtlCache::new(CacheConfig::default())?));
///     let sweep = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
///     // Later, during teardown:
///     sweep.stop();
/// }).await;
/// ```
pub fn spawn_sweep_task<S>(target: Rc<RefCell<S>>, interval: Duration) -> SweepHandle
where
    S: Sweepable + 'static,
{
    let task = tokio::task::spawn_local(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            interval.as_secs_f64()
        );

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        loop {
            ticker.tick().await;

            let removed = target.borrow_mut().sweep_expired();
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    });

    SweepHandle { task }
}
