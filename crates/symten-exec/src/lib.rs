//! # symten-exec
//!
//! Bounded-parallelism execution for filling many symmetric sparse tensors
//! at once.
//!
//! - [`ThreadGroup`] joins borrowed jobs on a rayon pool capped at
//!   [`ThreadGroupConfig::max_parallel_threads`]
//! - [`DetachThreadGroup`] runs `'static` jobs on detached threads whose
//!   completion is tracked by a [`ConditionCounter`]
//!
//! No job is ever suspended, cancelled or retried. Every job is expected
//! to hold exclusive write ownership of whatever it fills.

#![deny(warnings)]

pub mod config;
pub mod thread_group;

pub use config::ThreadGroupConfig;
pub use thread_group::{
    ConditionCounter, DetachThreadGroup, DetachedJob, ScopedJob, ThreadGroup, WorkGroup,
};
