//! Child context aggregation
//!
//! Builds the per-request snapshot from several independent record
//! collections. The base record is the only required fetch; the five
//! optional fetches run concurrently and each degrades to empty/absent on
//! failure without aborting the build.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::config::ContextConfig;
use crate::context::store::ChildRecordStore;
use crate::context::types::{Age, ChildContext, StatusCounts};
use crate::errors::{GuruError, Result};

/// Aggregates one child's records into a [`ChildContext`]
pub struct ChildContextAggregator {
    store: Arc<dyn ChildRecordStore>,
    config: ContextConfig,
}

impl ChildContextAggregator {
    pub fn new(store: Arc<dyn ChildRecordStore>) -> Self {
        Self::with_config(store, ContextConfig::default())
    }

    pub fn with_config(store: Arc<dyn ChildRecordStore>, config: ContextConfig) -> Self {
        Self { store, config }
    }

    /// Build a fresh context snapshot; `Ok(None)` means the child id is unknown
    pub async fn build(&self, child_id: &str) -> Result<Option<ChildContext>> {
        self.build_at(child_id, Utc::now()).await
    }

    /// Build against an explicit clock (derived fields are time-dependent)
    pub async fn build_at(
        &self,
        child_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ChildContext>> {
        let base = self
            .store
            .fetch_child(child_id)
            .await
            .map_err(|e| GuruError::RecordStore(e.to_string()))?;

        let Some(child) = base else {
            return Ok(None);
        };

        // Independent reads, no ordering dependency
        let (profile, works, observations, interactions, notes) = tokio::join!(
            self.store.fetch_mental_profile(child_id),
            self.store.fetch_work_records(child_id),
            self.store.fetch_observations(child_id),
            self.store.fetch_past_interactions(child_id),
            self.store.fetch_teacher_notes(child_id),
        );

        let mental_profile = profile.unwrap_or_else(|e| {
            warn!(child = child_id, error = %e, "mental profile unavailable, continuing without");
            None
        });

        let mut works = works.unwrap_or_else(|e| {
            warn!(child = child_id, error = %e, "work records unavailable, continuing without");
            Vec::new()
        });
        works.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        let status_counts = StatusCounts::tally(&works);
        works.truncate(self.config.max_works);

        let cutoff = now - Duration::days(self.config.observation_window_days);
        let mut observations = observations.unwrap_or_else(|e| {
            warn!(child = child_id, error = %e, "observations unavailable, continuing without");
            Vec::new()
        });
        observations.retain(|o| o.observed_at >= cutoff);
        observations.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        observations.truncate(self.config.max_observations);

        let mut interactions = interactions.unwrap_or_else(|e| {
            warn!(child = child_id, error = %e, "past interactions unavailable, continuing without");
            Vec::new()
        });
        interactions.sort_by(|a, b| b.asked_at.cmp(&a.asked_at));
        interactions.truncate(self.config.max_interactions);

        let mut notes = notes.unwrap_or_else(|e| {
            warn!(child = child_id, error = %e, "teacher notes unavailable, continuing without");
            Vec::new()
        });
        notes.retain(|n| !n.note.trim().is_empty());
        notes.sort_by(|a, b| b.noted_at.cmp(&a.noted_at));
        notes.truncate(self.config.max_teacher_notes);

        let today = now.date_naive();
        Ok(Some(ChildContext {
            id: child.id,
            first_name: child.first_name,
            age: age_at(child.birth_date, today),
            months_enrolled: whole_months_between(child.enrolled_on, today),
            classroom: child.classroom,
            mental_profile,
            current_works: works,
            status_counts,
            recent_observations: observations,
            past_interactions: interactions,
            teacher_notes: notes,
        }))
    }
}

/// Whole calendar months elapsed between two dates (0 if `to` precedes `from`)
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Age in years and residual months at a given date
fn age_at(birth_date: NaiveDate, today: NaiveDate) -> Age {
    let span = whole_months_between(birth_date, today);
    Age {
        years: span / 12,
        months: span % 12,
    }
}
