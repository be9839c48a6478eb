//! Data model for the aggregated child snapshot
//!
//! A `ChildContext` is built fresh per request and never cached: it
//! aggregates time-varying status, so staleness is worse than the cost of
//! re-aggregation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The required base record; its absence makes the whole build NotFound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRecord {
    pub id: String,
    /// First name only; family names never enter a prompt
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub enrolled_on: NaiveDate,
    pub classroom: String,
}

/// Progress status of one work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    NotStarted,
    Presented,
    Practicing,
    Mastered,
}

impl WorkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::NotStarted => "not started",
            WorkStatus::Presented => "presented",
            WorkStatus::Practicing => "practicing",
            WorkStatus::Mastered => "mastered",
        }
    }
}

/// One work-in-progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRecord {
    pub work_name: String,
    pub subject_area: String,
    pub status: WorkStatus,
    pub last_activity: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Derived per-status counts over the work records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub not_started: usize,
    pub presented: usize,
    pub practicing: usize,
    pub mastered: usize,
}

impl StatusCounts {
    pub fn tally(works: &[WorkRecord]) -> Self {
        let mut counts = Self::default();
        for work in works {
            match work.status {
                WorkStatus::NotStarted => counts.not_started += 1,
                WorkStatus::Presented => counts.presented += 1,
                WorkStatus::Practicing => counts.practicing += 1,
                WorkStatus::Mastered => counts.mastered += 1,
            }
        }
        counts
    }
}

/// Readiness state of one sensitive-period category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivePeriodStatus {
    NotYet,
    Emerging,
    Active,
    Waning,
    Passed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivePeriod {
    pub category: String,
    pub status: SensitivePeriodStatus,
}

/// Optional temperament and learning profile
///
/// Absence is a valid, non-error state; every consumer must degrade
/// gracefully when it is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentalProfile {
    /// Temperament trait name -> score on the assessment scale
    pub temperament: BTreeMap<String, f64>,
    /// Learning modality name -> relative weight
    pub modality_weights: BTreeMap<String, f64>,
    /// Sustained-focus baseline in minutes
    pub baseline_focus_minutes: u32,
    pub optimal_time_of_day: Option<String>,
    pub sensitive_periods: Vec<SensitivePeriod>,
    pub family_notes: Option<String>,
    pub sleep_status: Option<String>,
    pub special_considerations: Option<String>,
    pub successful_strategies: Vec<String>,
    pub known_triggers: Vec<String>,
}

/// One behavioral observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: Uuid,
    pub observed_at: DateTime<Utc>,
    pub description: String,
    pub antecedent: Option<String>,
    pub hypothesized_function: Option<String>,
    pub intervention_tried: Option<String>,
    pub effectiveness: Option<String>,
}

/// One prior advisory exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastInteraction {
    pub id: Uuid,
    pub asked_at: DateTime<Utc>,
    pub question: String,
    pub insight_summary: String,
    pub outcome: Option<String>,
}

/// One teacher note attached to a work session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherNote {
    pub work_name: String,
    pub note: String,
    pub noted_at: DateTime<Utc>,
}

/// Age derived from the birth date at build time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
}

/// The aggregated, read-only snapshot grounding one advisory request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildContext {
    pub id: String,
    pub first_name: String,
    pub age: Age,
    pub months_enrolled: u32,
    pub classroom: String,
    pub mental_profile: Option<MentalProfile>,
    /// Most-recent-first, truncated to the configured window
    pub current_works: Vec<WorkRecord>,
    pub status_counts: StatusCounts,
    /// Time-windowed, most-recent-first
    pub recent_observations: Vec<Observation>,
    pub past_interactions: Vec<PastInteraction>,
    /// Non-empty notes only
    pub teacher_notes: Vec<TeacherNote>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn work(status: WorkStatus) -> WorkRecord {
        WorkRecord {
            work_name: "Pink Tower".to_string(),
            subject_area: "Sensorial".to_string(),
            status,
            last_activity: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_status_counts_tally() {
        let works = vec![
            work(WorkStatus::Practicing),
            work(WorkStatus::Practicing),
            work(WorkStatus::Mastered),
            work(WorkStatus::NotStarted),
        ];
        let counts = StatusCounts::tally(&works);
        assert_eq!(counts.practicing, 2);
        assert_eq!(counts.mastered, 1);
        assert_eq!(counts.not_started, 1);
        assert_eq!(counts.presented, 0);
    }

    #[test]
    fn test_work_status_serde_snake_case() {
        let json = serde_json::to_string(&WorkStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
        let back: WorkStatus = serde_json::from_str("\"mastered\"").unwrap();
        assert_eq!(back, WorkStatus::Mastered);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(WorkStatus::Practicing.label(), "practicing");
        assert_eq!(WorkStatus::NotStarted.label(), "not started");
    }
}
