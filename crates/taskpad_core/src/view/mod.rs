//! Display projections derived from the task collection.
//!
//! # Responsibility
//! - Filter and sort tasks for rendering without touching the collection.
//! - Compute the counters shown alongside the list.
//!
//! # Invariants
//! - Projection is pure: same input, same output, input untouched.
//! - Filtering always runs before sorting.

mod options;
mod projector;

pub use options::{FilterOption, SortOption, UnknownOptionError};
pub use projector::{compare_text, counts, filter_tasks, project, sort_tasks, TaskCounts};
