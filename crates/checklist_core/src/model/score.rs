//! Completion score derived from a task collection.

use crate::model::task::Task;

/// Returns `round(100 * completed / total)` for `tasks`, or 0 when empty.
pub fn completion_score(tasks: &[Task]) -> u8 {
    let completed = tasks.iter().filter(|task| task.status).count();
    score_from_counts(completed, tasks.len())
}

/// Percentage of `completed` out of `total`, rounded half-up.
///
/// `completed` is clamped to `total`; an empty total scores 0.
pub fn score_from_counts(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}
