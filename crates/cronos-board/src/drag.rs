//! Reorder/drop coordination.
//!
//! Turns the end of a drag gesture into at most one [`DropIntent`]. A drop
//! target is either a status column (`todo`, `in-progress`, `done`) or
//! another task's id. Status identifiers are checked first.

use cronos_core::entities::Task;
use cronos_core::enums::TaskStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: String,
    },
}

/// What a completed drop asks the task store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropIntent {
    /// Move a task to another column, leaving every position unchanged.
    ChangeStatus { task_id: String, status: TaskStatus },
    /// Move a task to the position of `over_id`, keeping its status.
    Reorder { task_id: String, over_id: String },
}

impl DropIntent {
    #[must_use]
    pub fn task_id(&self) -> &str {
        match self {
            Self::ChangeStatus { task_id, .. } | Self::Reorder { task_id, .. } => task_id,
        }
    }

    /// The full list after the intent. Unknown ids leave the list as is.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut next = tasks.to_vec();
        match self {
            Self::ChangeStatus { task_id, status } => {
                if let Some(task) = next.iter_mut().find(|t| &t.id == task_id) {
                    task.status = *status;
                }
            }
            Self::Reorder { task_id, over_id } => {
                let from = next.iter().position(|t| &t.id == task_id);
                let to = next.iter().position(|t| &t.id == over_id);
                if let (Some(from), Some(to)) = (from, to) {
                    let moved = next.remove(from);
                    next.insert(to, moved);
                }
            }
        }
        next
    }
}

/// Two-state drag machine: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct DropCoordinator {
    state: DragState,
}

impl DropCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Record the dragged task. A second start replaces the first.
    pub fn start(&mut self, task_id: impl Into<String>) {
        self.state = DragState::Dragging {
            task_id: task_id.into(),
        };
    }

    /// The task being dragged, for rendering an overlay.
    #[must_use]
    pub fn active<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        match &self.state {
            DragState::Dragging { task_id } => tasks.iter().find(|t| &t.id == task_id),
            DragState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the gesture over `over` (`None` when dropped outside any
    /// target). Always returns to `Idle`.
    ///
    /// No intent is produced when:
    /// - no drag was in progress, or the dragged id is not in `tasks`;
    /// - there is no drop target;
    /// - the target is the dragged task's current column;
    /// - the target is the dragged task itself, or an id not in `tasks`.
    pub fn end(&mut self, over: Option<&str>, tasks: &[Task]) -> Option<DropIntent> {
        let DragState::Dragging { task_id } = std::mem::take(&mut self.state) else {
            return None;
        };
        let over = over?;
        let dragged = tasks.iter().find(|t| t.id == task_id)?;

        if let Some(status) = TaskStatus::from_identifier(over) {
            if dragged.status == status {
                return None;
            }
            return Some(DropIntent::ChangeStatus { task_id, status });
        }

        if over == task_id || !tasks.iter().any(|t| t.id == over) {
            return None;
        }
        Some(DropIntent::Reorder {
            task_id,
            over_id: over.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: None,
            status,
            date: None,
            time: None,
            author: None,
            organization: None,
            created_at: Utc::now(),
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Todo),
            task("c", TaskStatus::InProgress),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn column_drop_changes_status_only() {
        let tasks = board();
        let mut dnd = DropCoordinator::new();
        dnd.start("a");
        let intent = dnd.end(Some("done"), &tasks).unwrap();
        assert_eq!(
            intent,
            DropIntent::ChangeStatus {
                task_id: "a".into(),
                status: TaskStatus::Done
            }
        );

        let next = intent.apply(&tasks);
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        assert_eq!(next[0].status, TaskStatus::Done);
        assert_eq!(next[1].status, TaskStatus::Todo);
        assert_eq!(dnd.state(), &DragState::Idle);
    }

    #[test]
    fn status_identifier_wins_over_task_id() {
        let mut tasks = board();
        tasks.push(task("in-progress", TaskStatus::Done));
        let mut dnd = DropCoordinator::new();
        dnd.start("a");
        assert_eq!(
            dnd.end(Some("in-progress"), &tasks),
            Some(DropIntent::ChangeStatus {
                task_id: "a".into(),
                status: TaskStatus::InProgress
            })
        );
    }

    #[test]
    fn reorder_moves_to_target_position() {
        let tasks = board();
        let mut dnd = DropCoordinator::new();
        dnd.start("c");
        let intent = dnd.end(Some("a"), &tasks).unwrap();
        assert_eq!(
            intent,
            DropIntent::Reorder {
                task_id: "c".into(),
                over_id: "a".into()
            }
        );

        let next = intent.apply(&tasks);
        assert_eq!(ids(&next), vec!["c", "a", "b"]);
        assert_eq!(next[0].status, TaskStatus::InProgress);
    }

    #[test]
    fn reorder_downwards() {
        let tasks = board();
        let intent = DropIntent::Reorder {
            task_id: "a".into(),
            over_id: "c".into(),
        };
        assert_eq!(ids(&intent.apply(&tasks)), vec!["b", "c", "a"]);
    }

    #[rstest]
    #[case::cancelled(None)]
    #[case::onto_itself(Some("a"))]
    #[case::own_column(Some("todo"))]
    #[case::unknown_target(Some("zzz"))]
    fn no_intent(#[case] over: Option<&str>) {
        let tasks = board();
        let mut dnd = DropCoordinator::new();
        dnd.start("a");
        assert_eq!(dnd.end(over, &tasks), None);
        assert_eq!(dnd.state(), &DragState::Idle);
    }

    #[test]
    fn end_without_start_is_noop() {
        let mut dnd = DropCoordinator::new();
        assert_eq!(dnd.end(Some("done"), &board()), None);
    }

    #[test]
    fn unknown_dragged_task_is_noop() {
        let mut dnd = DropCoordinator::new();
        dnd.start("ghost");
        assert_eq!(dnd.end(Some("done"), &board()), None);
        assert_eq!(dnd.state(), &DragState::Idle);
    }

    #[test]
    fn active_tracks_drag_and_cancel() {
        let tasks = board();
        let mut dnd = DropCoordinator::new();
        assert!(dnd.active(&tasks).is_none());
        dnd.start("b");
        assert_eq!(dnd.active(&tasks).map(|t| t.id.as_str()), Some("b"));
        dnd.cancel();
        assert!(dnd.active(&tasks).is_none());
    }
}
