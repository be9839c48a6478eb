//! Child-record aggregation and prompt-ready rendering

pub mod aggregator;
pub mod format;
pub mod store;
pub mod types;

pub use aggregator::ChildContextAggregator;
pub use format::{render_child_context, render_knowledge, NO_REFERENCES_MESSAGE};
pub use store::ChildRecordStore;
pub use types::{
    Age, ChildContext, ChildRecord, MentalProfile, Observation, PastInteraction, SensitivePeriod,
    SensitivePeriodStatus, StatusCounts, TeacherNote, WorkRecord, WorkStatus,
};
