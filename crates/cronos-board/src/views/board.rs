use cronos_core::entities::Task;
use cronos_core::enums::TaskStatus;
use serde::Serialize;

/// Tasks split by status, each column in cache order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl BoardColumns {
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Columns left to right with their status.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[must_use]
pub fn board(tasks: &[Task]) -> BoardColumns {
    let mut columns = BoardColumns::default();
    for task in tasks {
        let column = match task.status {
            TaskStatus::Todo => &mut columns.todo,
            TaskStatus::InProgress => &mut columns.in_progress,
            TaskStatus::Done => &mut columns.done,
        };
        column.push(task.clone());
    }
    columns
}
