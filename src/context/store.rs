//! Record-store seam between the pipeline and the surrounding application
//!
//! Each method covers one independent record collection. Only
//! `fetch_child` is required for a build to succeed; every other fetch is
//! optional and degrades to empty/absent on failure.

use anyhow::Result;
use async_trait::async_trait;

use crate::context::types::{
    ChildRecord, MentalProfile, Observation, PastInteraction, TeacherNote, WorkRecord,
};

/// Read access to the per-child record collections
#[async_trait]
pub trait ChildRecordStore: Send + Sync {
    /// Base record; `Ok(None)` means the child id is unknown
    async fn fetch_child(&self, child_id: &str) -> Result<Option<ChildRecord>>;

    /// Optional temperament/learning profile
    async fn fetch_mental_profile(&self, child_id: &str) -> Result<Option<MentalProfile>>;

    /// Work-status records, any order
    async fn fetch_work_records(&self, child_id: &str) -> Result<Vec<WorkRecord>>;

    /// Behavioral observations, any order
    async fn fetch_observations(&self, child_id: &str) -> Result<Vec<Observation>>;

    /// Prior advisory exchanges, any order
    async fn fetch_past_interactions(&self, child_id: &str) -> Result<Vec<PastInteraction>>;

    /// Work-session notes, any order; empty notes are filtered downstream
    async fn fetch_teacher_notes(&self, child_id: &str) -> Result<Vec<TeacherNote>>;
}
