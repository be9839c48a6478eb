//! Plain-text rendering of the child context and retrieval result
//!
//! Produces the sections inserted into the user prompt. Rendering degrades
//! section by section: a section whose backing data is absent is omitted
//! entirely rather than emitted broken or empty.

use crate::context::types::{ChildContext, MentalProfile, SensitivePeriodStatus};
use crate::retrieval::KnowledgeResult;

/// Substituted when retrieval produced zero passages
pub const NO_REFERENCES_MESSAGE: &str =
    "No specific reference passages were found for this question; answer from general Montessori principles.";

/// Render the aggregated context into prompt-ready sections
pub fn render_child_context(ctx: &ChildContext) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "CHILD: {} ({} years {} months), classroom {}, enrolled {} months\n",
        ctx.first_name, ctx.age.years, ctx.age.months, ctx.classroom, ctx.months_enrolled
    ));

    if let Some(profile) = &ctx.mental_profile {
        render_profile(&mut out, profile);
    }

    out.push_str(&format!(
        "\nPROGRESS SUMMARY: {} mastered, {} practicing, {} presented, {} not started\n",
        ctx.status_counts.mastered,
        ctx.status_counts.practicing,
        ctx.status_counts.presented,
        ctx.status_counts.not_started
    ));

    if !ctx.current_works.is_empty() {
        out.push_str("\nCURRENT WORKS (most recent first):\n");
        for work in &ctx.current_works {
            out.push_str(&format!(
                "- {} [{}] {} (last activity {})",
                work.work_name,
                work.subject_area,
                work.status.label(),
                work.last_activity.format("%Y-%m-%d")
            ));
            if let Some(notes) = &work.notes {
                if !notes.trim().is_empty() {
                    out.push_str(&format!(" — {}", notes.trim()));
                }
            }
            out.push('\n');
        }
    }

    if !ctx.recent_observations.is_empty() {
        out.push_str("\nRECENT OBSERVATIONS:\n");
        for obs in &ctx.recent_observations {
            out.push_str(&format!(
                "- {}: {}",
                obs.observed_at.format("%Y-%m-%d"),
                obs.description
            ));
            if let Some(antecedent) = &obs.antecedent {
                out.push_str(&format!(" (antecedent: {})", antecedent));
            }
            if let Some(function) = &obs.hypothesized_function {
                out.push_str(&format!(" (likely function: {})", function));
            }
            if let Some(tried) = &obs.intervention_tried {
                out.push_str(&format!(" (tried: {}", tried));
                if let Some(effect) = &obs.effectiveness {
                    out.push_str(&format!(", effect: {}", effect));
                }
                out.push(')');
            }
            out.push('\n');
        }
    }

    if !ctx.past_interactions.is_empty() {
        out.push_str("\nPRIOR GUIDANCE:\n");
        for past in &ctx.past_interactions {
            out.push_str(&format!(
                "- {}: asked \"{}\" -> {}",
                past.asked_at.format("%Y-%m-%d"),
                past.question,
                past.insight_summary
            ));
            if let Some(outcome) = &past.outcome {
                out.push_str(&format!(" (outcome: {})", outcome));
            }
            out.push('\n');
        }
    }

    if !ctx.teacher_notes.is_empty() {
        out.push_str("\nTEACHER NOTES:\n");
        for note in &ctx.teacher_notes {
            out.push_str(&format!(
                "- {} ({}): {}\n",
                note.work_name,
                note.noted_at.format("%Y-%m-%d"),
                note.note
            ));
        }
    }

    out
}

fn render_profile(out: &mut String, profile: &MentalProfile) {
    out.push_str("\nTEMPERAMENT & LEARNING PROFILE:\n");

    if !profile.temperament.is_empty() {
        let traits: Vec<String> = profile
            .temperament
            .iter()
            .map(|(name, score)| format!("{} {:.1}", name, score))
            .collect();
        out.push_str(&format!("- Temperament: {}\n", traits.join(", ")));
    }

    if !profile.modality_weights.is_empty() {
        let modalities: Vec<String> = profile
            .modality_weights
            .iter()
            .map(|(name, weight)| format!("{} {:.0}%", name, weight * 100.0))
            .collect();
        out.push_str(&format!("- Learning modalities: {}\n", modalities.join(", ")));
    }

    out.push_str(&format!(
        "- Baseline focus: {} minutes\n",
        profile.baseline_focus_minutes
    ));

    if let Some(time) = &profile.optimal_time_of_day {
        out.push_str(&format!("- Works best: {}\n", time));
    }

    let active: Vec<&str> = profile
        .sensitive_periods
        .iter()
        .filter(|sp| {
            matches!(
                sp.status,
                SensitivePeriodStatus::Active | SensitivePeriodStatus::Emerging
            )
        })
        .map(|sp| sp.category.as_str())
        .collect();
    if !active.is_empty() {
        out.push_str(&format!("- Active sensitive periods: {}\n", active.join(", ")));
    }

    if let Some(sleep) = &profile.sleep_status {
        out.push_str(&format!("- Sleep: {}\n", sleep));
    }
    if let Some(notes) = &profile.family_notes {
        out.push_str(&format!("- Family notes: {}\n", notes));
    }
    if let Some(considerations) = &profile.special_considerations {
        out.push_str(&format!("- Special considerations: {}\n", considerations));
    }
    if !profile.successful_strategies.is_empty() {
        out.push_str(&format!(
            "- What has worked: {}\n",
            profile.successful_strategies.join("; ")
        ));
    }
    if !profile.known_triggers.is_empty() {
        out.push_str(&format!(
            "- Known triggers: {}\n",
            profile.known_triggers.join("; ")
        ));
    }
}

/// Render retrieved passages with provenance
pub fn render_knowledge(result: &KnowledgeResult) -> String {
    if result.passages.is_empty() {
        return format!("REFERENCES:\n{}\n", NO_REFERENCES_MESSAGE);
    }

    let mut out = String::from("REFERENCES:\n");
    for (i, passage) in result.passages.iter().enumerate() {
        out.push_str(&format!(
            "[{}] {} (lines {}-{}):\n{}\n\n",
            i + 1,
            passage.display_name,
            passage.start_line,
            passage.end_line,
            passage.content
        ));
    }
    out.push_str(&format!("Topics consulted: {}\n", result.topics.join(", ")));
    out
}
