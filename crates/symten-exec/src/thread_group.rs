//! Bounded-parallelism thread groups
//!
//! Two ways to run a batch of independent jobs with at most
//! `max_parallel_threads` of them active at once:
//!
//! - [`ThreadGroup`]: jobs may borrow from the caller; `run` joins them all
//!   on a capped rayon pool before returning.
//! - [`DetachThreadGroup`]: `'static` jobs on detached OS threads; nothing
//!   is joined, completion is tracked by a shared [`ConditionCounter`].
//!
//! Both implement [`WorkGroup`]. Each job must own whatever it writes: the
//! groups provide no synchronization between jobs.
//!
//! # Examples
//!
//! ```
//! use symten_exec::{ThreadGroup, ThreadGroupConfig, WorkGroup};
//!
//! let mut squares = vec![0usize; 8];
//! let mut group = ThreadGroup::new(ThreadGroupConfig::default().max_parallel_threads(3));
//! for (i, slot) in squares.iter_mut().enumerate() {
//!     group.add_job(Box::new(move || *slot = i * i));
//! }
//! group.run().unwrap();
//! assert_eq!(squares[7], 49);
//! ```

use crate::config::ThreadGroupConfig;
use anyhow::{anyhow, Result};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// A batch of jobs run with bounded parallelism
pub trait WorkGroup {
    type Job;

    fn add_job(&mut self, job: Self::Job);

    /// Number of jobs waiting to run
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every job and return once all have finished
    fn run(self) -> Result<()>;
}

/// Job borrowing from its environment for at most `'a`
pub type ScopedJob<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Job owning everything it touches
pub type DetachedJob = Box<dyn FnOnce() + Send + 'static>;

/// Joinable group of borrowed jobs
///
/// A panicking job is propagated out of [`WorkGroup::run`] after the
/// remaining jobs finish.
pub struct ThreadGroup<'a> {
    config: ThreadGroupConfig,
    jobs: Vec<ScopedJob<'a>>,
}

impl<'a> ThreadGroup<'a> {
    pub fn new(config: ThreadGroupConfig) -> Self {
        Self {
            config,
            jobs: Vec::new(),
        }
    }

    pub fn config(&self) -> &ThreadGroupConfig {
        &self.config
    }
}

impl<'a> WorkGroup for ThreadGroup<'a> {
    type Job = ScopedJob<'a>;

    fn add_job(&mut self, job: ScopedJob<'a>) {
        self.jobs.push(job);
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }

    fn run(self) -> Result<()> {
        if self.jobs.is_empty() {
            return Ok(());
        }
        let threads = self.config.max_parallel_threads.min(self.jobs.len()).max(1);
        log::debug!(
            "running {} jobs on at most {} threads",
            self.jobs.len(),
            threads
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("symten-worker-{}", i))
            .build()
            .map_err(|e| anyhow!("Failed to build thread pool: {}", e))?;

        let jobs = self.jobs;
        pool.scope(move |s| {
            for job in jobs {
                s.spawn(move |_| job());
            }
        });
        Ok(())
    }
}

/// Counter guarded by a mutex, with a condition signalled on every change
#[derive(Debug, Default)]
pub struct ConditionCounter {
    count: Mutex<usize>,
    changed: Condvar,
}

impl ConditionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increase(&self) {
        let mut count = self.count.lock();
        *count += 1;
        self.changed.notify_all();
    }

    pub fn decrease(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        self.changed.notify_all();
    }

    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Block until the count drops below `n`
    pub fn wait_below(&self, n: usize) {
        let mut count = self.count.lock();
        while *count >= n {
            self.changed.wait(&mut count);
        }
    }

    /// Block until the count reaches zero
    pub fn wait_zero(&self) {
        self.wait_below(1);
    }
}

/// Decrements the counter when dropped, also on unwinding
struct CounterGuard(Arc<ConditionCounter>);

impl Drop for CounterGuard {
    fn drop(&mut self) {
        self.0.decrease();
    }
}

/// Group of detached jobs tracked by a shared counter
///
/// A panicking job terminates only its own thread; the counter is still
/// decremented so [`WorkGroup::run`] returns normally.
pub struct DetachThreadGroup {
    config: ThreadGroupConfig,
    jobs: Vec<DetachedJob>,
    counter: Arc<ConditionCounter>,
}

impl DetachThreadGroup {
    pub fn new(config: ThreadGroupConfig) -> Self {
        Self {
            config,
            jobs: Vec::new(),
            counter: Arc::new(ConditionCounter::new()),
        }
    }

    /// Counter of currently running jobs
    pub fn counter(&self) -> Arc<ConditionCounter> {
        Arc::clone(&self.counter)
    }
}

impl WorkGroup for DetachThreadGroup {
    type Job = DetachedJob;

    fn add_job(&mut self, job: DetachedJob) {
        self.jobs.push(job);
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }

    fn run(self) -> Result<()> {
        let max = self.config.max_parallel_threads.max(1);
        log::debug!(
            "running {} detached jobs, at most {} at once",
            self.jobs.len(),
            max
        );
        for (i, job) in self.jobs.into_iter().enumerate() {
            self.counter.wait_below(max);
            self.counter.increase();
            let guard = CounterGuard(Arc::clone(&self.counter));
            let spawned = std::thread::Builder::new()
                .name(format!("symten-detached-{}", i))
                .spawn(move || {
                    let _guard = guard;
                    job();
                });
            match spawned {
                Ok(_) => log::trace!("detached job {} started", i),
                Err(e) => {
                    self.counter.wait_zero();
                    return Err(anyhow!("Failed to spawn detached job {}: {}", i, e));
                }
            }
        }
        self.counter.wait_zero();
        Ok(())
    }
}
