//! Focus-time sessions and their daily aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use uuid::Uuid;

use super::{Calendar, MonthWindow, UserId};

/// Validation errors raised by [`FocusTimeSession::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusTimeValidationError {
    #[error("focus time must end at or after it starts")]
    EndsBeforeStart,
}

/// Input payload for [`FocusTimeSession::new`].
#[derive(Debug, Clone)]
pub struct FocusTimeDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub time_from: DateTime<Utc>,
    pub time_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A completed block of focused work.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use habit_tracker::domain::{FocusTimeDraft, FocusTimeSession, UserId};
/// use uuid::Uuid;
///
/// let from = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
/// let to = Utc.with_ymd_and_hms(2024, 3, 15, 9, 25, 0).unwrap();
/// let session = FocusTimeSession::new(FocusTimeDraft {
///     id: Uuid::new_v4(),
///     user_id: UserId::random(),
///     time_from: from,
///     time_to: to,
///     created_at: to,
///     updated_at: to,
/// })
/// .expect("ordered interval");
/// assert_eq!(session.duration().num_minutes(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimeSession {
    id: Uuid,
    user_id: UserId,
    time_from: DateTime<Utc>,
    time_to: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FocusTimeSession {
    /// Creates a validated session; `time_to` may equal `time_from`.
    pub fn new(draft: FocusTimeDraft) -> Result<Self, FocusTimeValidationError> {
        if draft.time_to < draft.time_from {
            return Err(FocusTimeValidationError::EndsBeforeStart);
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            time_from: draft.time_from,
            time_to: draft.time_to,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn time_from(&self) -> DateTime<Utc> {
        self.time_from
    }

    pub fn time_to(&self) -> DateTime<Utc> {
        self.time_to
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn duration(&self) -> TimeDelta {
        self.time_to - self.time_from
    }
}

/// Focus time accumulated on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimeDayBucket {
    pub day: NaiveDate,
    pub count: u32,
    pub total_seconds: i64,
}

/// Group sessions starting inside `window` by the calendar day of their start.
///
/// Sessions outside the window are ignored. Buckets are returned in ascending
/// day order and only days with at least one session appear.
pub fn daily_focus_buckets<'a>(
    sessions: impl IntoIterator<Item = &'a FocusTimeSession>,
    calendar: &Calendar,
    window: &MonthWindow,
) -> Vec<FocusTimeDayBucket> {
    let mut by_day: BTreeMap<NaiveDate, FocusTimeDayBucket> = BTreeMap::new();
    for session in sessions {
        if !window.contains(session.time_from()) {
            continue;
        }
        let day = calendar.day_of(session.time_from());
        let bucket = by_day.entry(day).or_insert(FocusTimeDayBucket {
            day,
            count: 0,
            total_seconds: 0,
        });
        bucket.count += 1;
        bucket.total_seconds += session.duration().num_seconds();
    }
    by_day.into_values().collect()
}
