//! End-to-end tests for the advisory pipeline
//!
//! Drives the full path with an in-memory record store and an on-disk
//! corpus fixture: aggregate, retrieve, assemble, then parse a synthetic
//! model reply.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use uuid::Uuid;

use montessori_guru::context::types::{
    ChildRecord, MentalProfile, Observation, PastInteraction, SensitivePeriod,
    SensitivePeriodStatus, TeacherNote, WorkRecord, WorkStatus,
};
use montessori_guru::context::ChildRecordStore;
use montessori_guru::corpus::{TopicEntry, TopicIndex, TopicSource};
use montessori_guru::parser::ExtractionStrategy;
use montessori_guru::prompt::RESPONSE_SECTION_HEADERS;
use montessori_guru::{CorpusStore, GuruPipeline};

struct InMemoryStore;

#[async_trait]
impl ChildRecordStore for InMemoryStore {
    async fn fetch_child(&self, child_id: &str) -> Result<Option<ChildRecord>> {
        if child_id != "emma-01" {
            return Ok(None);
        }
        Ok(Some(ChildRecord {
            id: "emma-01".to_string(),
            first_name: "Emma".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            enrolled_on: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            classroom: "Primary A".to_string(),
        }))
    }

    async fn fetch_mental_profile(&self, _child_id: &str) -> Result<Option<MentalProfile>> {
        Ok(Some(MentalProfile {
            temperament: BTreeMap::from([
                ("activity".to_string(), 4.2),
                ("persistence".to_string(), 2.8),
            ]),
            modality_weights: BTreeMap::from([("kinesthetic".to_string(), 0.7)]),
            baseline_focus_minutes: 8,
            optimal_time_of_day: Some("early morning".to_string()),
            sensitive_periods: vec![SensitivePeriod {
                category: "movement".to_string(),
                status: SensitivePeriodStatus::Active,
            }],
            family_notes: Some("New sibling arrived in spring".to_string()),
            sleep_status: Some("short nights lately".to_string()),
            special_considerations: None,
            successful_strategies: vec!["heavy work before group time".to_string()],
            known_triggers: vec!["long waits".to_string()],
        }))
    }

    async fn fetch_work_records(&self, _child_id: &str) -> Result<Vec<WorkRecord>> {
        Ok(vec![
            WorkRecord {
                work_name: "Pink Tower".to_string(),
                subject_area: "Sensorial".to_string(),
                status: WorkStatus::Mastered,
                last_activity: Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
                notes: None,
            },
            WorkRecord {
                work_name: "Sandpaper Letters".to_string(),
                subject_area: "Language".to_string(),
                status: WorkStatus::Practicing,
                last_activity: Utc.with_ymd_and_hms(2024, 6, 18, 9, 0, 0).unwrap(),
                notes: Some("traces l and m confidently".to_string()),
            },
        ])
    }

    async fn fetch_observations(&self, _child_id: &str) -> Result<Vec<Observation>> {
        Ok(vec![Observation {
            id: Uuid::new_v4(),
            observed_at: Utc.with_ymd_and_hms(2024, 6, 17, 10, 30, 0).unwrap(),
            description: "Left circle time twice to visit the shelf".to_string(),
            antecedent: Some("long group lesson".to_string()),
            hypothesized_function: Some("movement need".to_string()),
            intervention_tried: Some("offered a floor cushion".to_string()),
            effectiveness: Some("helped briefly".to_string()),
        }])
    }

    async fn fetch_past_interactions(&self, _child_id: &str) -> Result<Vec<PastInteraction>> {
        Ok(vec![PastInteraction {
            id: Uuid::new_v4(),
            asked_at: Utc.with_ymd_and_hms(2024, 5, 2, 14, 0, 0).unwrap(),
            question: "How do we help Emma nap at school?".to_string(),
            insight_summary: "Shorten the pre-nap transition".to_string(),
            outcome: Some("napping most days now".to_string()),
        }])
    }

    async fn fetch_teacher_notes(&self, _child_id: &str) -> Result<Vec<TeacherNote>> {
        Ok(vec![TeacherNote {
            work_name: "Sandpaper Letters".to_string(),
            note: "Asked for a third repetition".to_string(),
            noted_at: Utc.with_ymd_and_hms(2024, 6, 18, 9, 30, 0).unwrap(),
        }])
    }
}

fn corpus_fixture() -> (tempfile::TempDir, Arc<CorpusStore>, Arc<TopicIndex>) {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (1..=200)
        .map(|i| {
            format!(
                "paragraph {} on the child's power of concentration and the prepared environment\n",
                i
            )
        })
        .collect();
    let mut f = std::fs::File::create(dir.path().join("absorbent_mind.txt")).unwrap();
    f.write_all(body.as_bytes()).unwrap();

    let index = TopicIndex::from_entries(vec![
        TopicEntry {
            key: "concentration.focus".to_string(),
            sources: vec![TopicSource {
                source_id: "absorbent_mind".to_string(),
                display_name: "The Absorbent Mind".to_string(),
                ranges: vec![(20, 60)],
            }],
            match_count: 1,
            key_passages: vec![],
        },
        TopicEntry {
            key: "environment.prepared".to_string(),
            sources: vec![TopicSource {
                source_id: "absorbent_mind".to_string(),
                display_name: "The Absorbent Mind".to_string(),
                ranges: vec![(120, 160)],
            }],
            match_count: 1,
            key_passages: vec![],
        },
    ]);

    let store = Arc::new(CorpusStore::new(dir.path()));
    (dir, store, Arc::new(index))
}

fn pipeline() -> (tempfile::TempDir, GuruPipeline) {
    let (dir, store, index) = corpus_fixture();
    let pipeline = GuruPipeline::new(Arc::new(InMemoryStore), index, store);
    (dir, pipeline)
}

#[tokio::test]
async fn unknown_child_yields_none_not_error() {
    let (_dir, pipeline) = pipeline();
    let result = pipeline
        .build_prompt("nobody-99", "Why won't he nap?")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn known_child_yields_complete_prompt_pair() {
    let (_dir, pipeline) = pipeline();
    let parts = pipeline
        .build_prompt("emma-01", "Emma keeps interrupting circle time and can't sit still")
        .await
        .unwrap()
        .expect("child exists");

    assert!(!parts.system_prompt.is_empty());
    assert!(parts.user_prompt.contains("CHILD: Emma ("));
    assert!(parts.user_prompt.contains("PROGRESS SUMMARY"));
    assert!(parts.user_prompt.contains("Active sensitive periods: movement"));
    assert!(parts.user_prompt.contains("The Absorbent Mind"));
    assert!(parts
        .user_prompt
        .contains("QUESTION: Emma keeps interrupting circle time"));
}

#[tokio::test]
async fn circle_time_question_maps_to_concentration_topics() {
    let (_dir, pipeline) = pipeline();
    let result = pipeline
        .retrieve("Emma keeps interrupting circle time and can't sit still", 5)
        .await;
    assert!(result.topics.iter().any(|t| t.starts_with("concentration.")));
    assert!(!result.passages.is_empty());
    for passage in &result.passages {
        assert!(passage.content.chars().count() <= 1500);
    }
}

#[tokio::test]
async fn passage_budget_zero_keeps_topic_identification() {
    let (_dir, pipeline) = pipeline();
    let result = pipeline.retrieve("can't sit still at circle", 0).await;
    assert!(result.passages.is_empty());
    assert!(!result.topics.is_empty());
}

#[tokio::test]
async fn corpus_loaded_once_across_requests() {
    let (_dir, store, index) = corpus_fixture();
    let pipeline = GuruPipeline::new(Arc::new(InMemoryStore), index, store.clone());

    pipeline.retrieve("trouble with focus", 3).await;
    pipeline.retrieve("still cannot concentrate", 3).await;

    assert_eq!(store.load_count(), 1);
}

#[tokio::test]
async fn full_round_trip_parses_synthetic_reply() {
    let (_dir, pipeline) = pipeline();
    pipeline
        .build_prompt("emma-01", "She can't sit still at circle time")
        .await
        .unwrap()
        .expect("prompt built");

    let reply = "\
INSIGHT: Emma is seeking movement, not attention.
ROOT CAUSE: Circle time exceeds her current focus baseline.
ACTION PLAN:
1. Pre-load movement: send her on a carrying errand right before circle.
2. Give a role: she hands out the name cards each morning.
3. Shorten gradually: start with eight minutes and add one per week.
TIMELINE: Reassess after three weeks.
PARENT TALKING POINT: Emma's body needs to move before her mind can settle.";

    let parsed = pipeline.parse_response(reply);
    assert_eq!(parsed.action_plan.len(), 3);
    assert_eq!(
        parsed
            .action_plan
            .iter()
            .map(|i| i.priority)
            .collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(parsed.action_plan[1].action, "Give a role");
    assert!(parsed.insight.contains("seeking movement"));
    assert_eq!(parsed.strategies.insight, ExtractionStrategy::Header);
    assert_eq!(parsed.raw_response, reply);
}

#[tokio::test]
async fn garbage_reply_still_yields_usable_structure() {
    let (_dir, pipeline) = pipeline();
    let parsed = pipeline.parse_response("%%% ??? no structure here at all");
    assert!(!parsed.action_plan.is_empty());
    assert!(!parsed.parent_talking_point.is_empty());
}

#[tokio::test]
async fn prompt_closing_instruction_matches_parser_headers() {
    let (_dir, pipeline) = pipeline();
    let parts = pipeline
        .build_prompt("emma-01", "anything")
        .await
        .unwrap()
        .unwrap();
    for header in RESPONSE_SECTION_HEADERS {
        assert!(parts.user_prompt.contains(header));
    }
}
