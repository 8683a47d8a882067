use std::collections::BTreeMap;

use chrono::NaiveDate;
use cronos_core::entities::Task;
use serde::Serialize;

/// Shown when no task has a date.
pub const EMPTY_TIMELINE: &str = "No scheduled tasks. Add dates to your tasks to see them here.";

/// Dated tasks grouped by day, days ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    days: BTreeMap<NaiveDate, Vec<Task>>,
}

impl Timeline {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &[Task])> {
        self.days.iter().map(|(date, tasks)| (date, tasks.as_slice()))
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> &[Task] {
        self.days.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Every task in timeline order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.days.values().flatten()
    }
}

/// Drop undated tasks, order by `(date, time)` with a missing time counting
/// as midnight, and group by date. Equal keys keep cache order.
#[must_use]
pub fn timeline(tasks: &[Task]) -> Timeline {
    let mut dated: Vec<&Task> = tasks.iter().filter(|t| t.date.is_some()).collect();
    dated.sort_by_key(|t| (t.date, t.time.unwrap_or_default()));

    let mut days: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in dated {
        if let Some(date) = task.date {
            days.entry(date).or_default().push(task.clone());
        }
    }
    Timeline { days }
}
