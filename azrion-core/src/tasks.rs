//! The to-do list: add, complete, and pick a pending task for reminders.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::memory::{MemoryDocument, Task, TaskStatus};

/// Append a new pending task.
pub fn add_task(doc: &mut MemoryDocument, description: impl Into<String>) {
    doc.tasks.push(Task::pending(description));
}

/// Mark done every task whose description contains `fragment`
/// (case-insensitive). Returns how many tasks changed state.
pub fn complete_tasks(doc: &mut MemoryDocument, fragment: &str) -> usize {
    let needle = fragment.to_lowercase();
    let mut completed = 0;
    for task in &mut doc.tasks {
        if task.description.to_lowercase().contains(&needle) && task.is_pending() {
            task.status = TaskStatus::Done;
            completed += 1;
        }
    }
    completed
}

/// Pending tasks in insertion order.
pub fn pending_tasks(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(|t| t.is_pending())
}

/// A uniformly random pending task, if any.
pub fn pick_pending<'a, R: Rng + ?Sized>(tasks: &'a [Task], rng: &mut R) -> Option<&'a Task> {
    let pending: Vec<&Task> = pending_tasks(tasks).collect();
    pending.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn complete_matches_fragment_case_insensitively() {
        let mut doc = MemoryDocument::new();
        add_task(&mut doc, "Finish the Parser");
        add_task(&mut doc, "write parser tests");
        add_task(&mut doc, "buy milk");

        assert_eq!(complete_tasks(&mut doc, "PARSER"), 2);
        assert_eq!(doc.tasks.len(), 3, "tasks are never deleted");
        let pending: Vec<_> = pending_tasks(&doc.tasks).map(|t| t.description.as_str()).collect();
        assert_eq!(pending, vec!["buy milk"]);

        // Already done tasks are not counted twice.
        assert_eq!(complete_tasks(&mut doc, "parser"), 0);
    }

    #[test]
    fn pick_pending_only_returns_pending() {
        let mut doc = MemoryDocument::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(pick_pending(&doc.tasks, &mut rng).is_none());

        add_task(&mut doc, "done already");
        add_task(&mut doc, "still open");
        complete_tasks(&mut doc, "done already");

        for _ in 0..20 {
            let task = pick_pending(&doc.tasks, &mut rng).expect("one pending");
            assert_eq!(task.description, "still open");
        }
    }
}
