//! Pure filter/sort projection over a task slice.

use super::options::{FilterOption, SortOption};
use crate::model::task::Task;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Counters shown next to the list, always over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    /// Tasks with `completed == false`.
    pub active: usize,
}

impl TaskCounts {
    pub fn completed(&self) -> usize {
        self.total.saturating_sub(self.active)
    }
}

/// Returns the tasks to display: `sort(filter(tasks))`.
///
/// Borrowed tasks keep collection identity; the input slice is not reordered.
pub fn project(tasks: &[Task], sort: SortOption, filter: FilterOption) -> Vec<&Task> {
    let mut visible = filter_tasks(tasks, filter);
    sort_tasks(&mut visible, sort);
    visible
}

/// Keeps tasks matching `filter`, in collection order.
pub fn filter_tasks(tasks: &[Task], filter: FilterOption) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            FilterOption::All => true,
            FilterOption::Active => !task.is_completed(),
            FilterOption::Completed => task.is_completed(),
        })
        .collect()
}

/// Reorders `tasks` in place. Every ordering is stable.
pub fn sort_tasks(tasks: &mut [&Task], sort: SortOption) {
    match sort {
        SortOption::Date => tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortOption::Alphabetical => tasks.sort_by(|a, b| compare_text(a.text(), b.text())),
        SortOption::Completed => tasks.sort_by_key(|task| task.is_completed()),
    }
}

/// Locale-style text ordering.
///
/// Levels, each consulted only on a tie of the previous one:
/// 1. base letters: canonical decomposition with accents dropped, case folded;
/// 2. accents: the folded decomposition with combining marks kept;
/// 3. case: lowercase before uppercase at the first differing position;
/// 4. raw code points.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| with_accents(a).cmp(with_accents(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn with_accents(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

fn case_pattern(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    TaskCounts {
        total: tasks.len(),
        active: tasks.iter().filter(|task| !task.is_completed()).count(),
    }
}
