//! Habit entities and completion bookkeeping.
//!
//! A habit records the calendar days on which it was completed. Each entry in
//! `completed_dates` is the canonical start-of-day timestamp produced by
//! [`Calendar::start_of_day`](super::Calendar::start_of_day); the toggle keeps
//! at most one entry per canonical day.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{MonthWindow, UserId};

/// Upper bound on habit name length, counted in characters.
pub const HABIT_NAME_MAX: usize = 120;

/// Validation errors raised by habit constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitValidationError {
    #[error("habit name must not be blank")]
    EmptyName,
    #[error("habit name must be at most {max} characters (got {length})")]
    NameTooLong { max: usize, length: usize },
}

/// Display name of a habit, unique per owner.
///
/// Surrounding whitespace is trimmed before validation.
///
/// # Examples
/// ```
/// use habit_tracker::domain::HabitName;
///
/// let name = HabitName::new("  Read  ").expect("valid name");
/// assert_eq!(name.as_ref(), "Read");
/// assert!(HabitName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HabitName(String);

impl HabitName {
    /// Validate and construct a habit name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length > HABIT_NAME_MAX {
            return Err(HabitValidationError::NameTooLong {
                max: HABIT_NAME_MAX,
                length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for HabitName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for HabitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HabitName> for String {
    fn from(value: HabitName) -> Self {
        value.0
    }
}

/// Input payload for [`Habit::new`].
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: HabitName,
    pub completed_dates: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of [`Habit::toggle_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionToggle {
    /// The day was appended.
    Marked,
    /// The day was removed.
    Unmarked,
}

/// A habit owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    id: Uuid,
    user_id: UserId,
    name: HabitName,
    completed_dates: Vec<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(draft: HabitDraft) -> Self {
        let HabitDraft {
            id,
            user_id,
            name,
            completed_dates,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            user_id,
            name,
            completed_dates,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &HabitName {
        &self.name
    }

    /// Completion timestamps in insertion order.
    pub fn completed_dates(&self) -> &[DateTime<Utc>] {
        self.completed_dates.as_slice()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark or un-mark `day` as completed.
    ///
    /// `day` must already be normalised to the start of its calendar day.
    /// Matching is by exact timestamp equality: a stored entry that is not
    /// exactly at start-of-day never matches, so toggling that day appends a
    /// second entry alongside it. Such entries can only come from data written
    /// outside this type and are left untouched.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use habit_tracker::domain::{CompletionToggle, Habit, HabitDraft, HabitName, UserId};
    /// use uuid::Uuid;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
    /// let mut habit = Habit::new(HabitDraft {
    ///     id: Uuid::new_v4(),
    ///     user_id: UserId::random(),
    ///     name: HabitName::new("Read").unwrap(),
    ///     completed_dates: Vec::new(),
    ///     created_at: now,
    ///     updated_at: now,
    /// });
    /// let day = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
    /// assert_eq!(habit.toggle_completion(day, now), CompletionToggle::Marked);
    /// assert_eq!(habit.completed_dates(), &[day]);
    /// assert_eq!(habit.toggle_completion(day, now), CompletionToggle::Unmarked);
    /// assert!(habit.completed_dates().is_empty());
    /// ```
    pub fn toggle_completion(
        &mut self,
        day: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> CompletionToggle {
        self.updated_at = updated_at;
        if self.completed_dates.contains(&day) {
            self.completed_dates.retain(|entry| *entry != day);
            CompletionToggle::Unmarked
        } else {
            self.completed_dates.push(day);
            CompletionToggle::Marked
        }
    }

    /// Completion timestamps inside `window`, insertion order preserved.
    pub fn completions_within(&self, window: &MonthWindow) -> Vec<DateTime<Utc>> {
        self.completed_dates
            .iter()
            .copied()
            .filter(|entry| window.contains(*entry))
            .collect()
    }

    /// Project the habit onto the completions of a single month.
    pub fn month_metrics(&self, window: &MonthWindow) -> HabitMonthMetrics {
        HabitMonthMetrics {
            id: self.id,
            name: self.name.clone(),
            completed_dates: self.completions_within(window),
        }
    }
}

/// Habit completions restricted to one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitMonthMetrics {
    pub id: Uuid,
    pub name: HabitName,
    pub completed_dates: Vec<DateTime<Utc>>,
}
