//! Shared test utilities for cronos-db unit tests.

use chrono::{NaiveDate, NaiveTime};
use cronos_core::entities::TaskDraft;
use cronos_core::enums::TaskStatus;

use crate::CronosDb;

pub async fn test_db() -> CronosDb {
    CronosDb::open_local(":memory:").await.unwrap()
}

/// A fully populated draft.
pub fn scheduled_draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.into(),
        description: Some("details".into()),
        status: Some(TaskStatus::InProgress),
        date: NaiveDate::from_ymd_opt(2025, 3, 14),
        time: NaiveTime::from_hms_opt(9, 30, 0),
        author: Some("dana".into()),
        organization: Some("Acme".into()),
    }
}
