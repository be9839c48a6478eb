//! Total parser for the model's free-text reply
//!
//! Extraction runs three ordered strategies per section: strict header
//! match, heuristic fallback, documented default. The result is always a
//! fully-populated [`ParsedResponse`] with a non-empty action plan; the
//! raw text is retained for audit.

use serde::{Deserialize, Serialize};

use crate::prompt::persona::RESPONSE_SECTION_HEADERS;

/// How a section's text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// The expected header was found and its body captured
    Header,
    /// Header missing; a documented heuristic located plausible text
    Heuristic,
    /// Neither strategy applied; the documented default was substituted
    Default,
}

/// One step of the recommended action plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// 1-based position in the numbered list
    pub priority: usize,
    /// Text before the first colon (the whole item when there is none)
    pub action: String,
    /// Text after the first colon (the whole item when there is none)
    pub details: String,
}

/// Which strategy produced each field
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldStrategies {
    pub insight: ExtractionStrategy,
    pub root_cause: ExtractionStrategy,
    pub action_plan: ExtractionStrategy,
    pub timeline: ExtractionStrategy,
    pub parent_talking_point: ExtractionStrategy,
}

/// Structured advisory answer; every field is always populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub insight: String,
    pub root_cause: String,
    /// Never empty; a fallback item is synthesized when parsing fails
    pub action_plan: Vec<ActionItem>,
    pub timeline: String,
    pub parent_talking_point: String,
    pub strategies: FieldStrategies,
    /// Original model output, retained verbatim
    pub raw_response: String,
}

/// Default substituted when no insight text can be located at all
pub const DEFAULT_INSIGHT: &str =
    "The response did not contain a recognizable insight; review the full text.";
/// Default root cause when the section is missing
pub const DEFAULT_ROOT_CAUSE: &str =
    "The underlying cause could not be determined from this response.";
/// Default timeline when the section is missing
pub const DEFAULT_TIMELINE: &str = "Observe for two to three weeks, then reassess.";
/// Default parent talking point when the section is missing
pub const DEFAULT_PARENT_TALKING_POINT: &str =
    "Share with the family that the school is observing closely and will follow up with specifics.";

/// Characters of raw text used for the insight fallback
const INSIGHT_FALLBACK_CHARS: usize = 300;
/// Characters of raw text used for the synthesized action item
const ACTION_FALLBACK_CHARS: usize = 200;

/// Parse a raw model reply into the fixed advisory structure
pub fn parse(raw_response: &str) -> ParsedResponse {
    let sections = split_sections(raw_response);

    let (insight, insight_strategy) = extract_insight(raw_response, sections[0].as_deref());
    let (root_cause, root_cause_strategy) = extract_root_cause(raw_response, sections[1].as_deref());
    let (action_plan, action_plan_strategy) = extract_action_plan(raw_response, sections[2].as_deref());
    let (timeline, timeline_strategy) = extract_timeline(raw_response, sections[3].as_deref());
    let (parent_talking_point, talking_point_strategy) =
        extract_talking_point(sections[4].as_deref());

    ParsedResponse {
        insight,
        root_cause,
        action_plan,
        timeline,
        parent_talking_point,
        strategies: FieldStrategies {
            insight: insight_strategy,
            root_cause: root_cause_strategy,
            action_plan: action_plan_strategy,
            timeline: timeline_strategy,
            parent_talking_point: talking_point_strategy,
        },
        raw_response: raw_response.to_string(),
    }
}

/// Strict strategy: locate each expected header and capture its body
///
/// A section's body runs from just past its header to the nearest
/// later-positioned header, in the fixed documented header order.
fn split_sections(raw: &str) -> [Option<String>; 5] {
    let positions: Vec<Option<usize>> = RESPONSE_SECTION_HEADERS
        .iter()
        .map(|h| find_ascii_case_insensitive(raw, h))
        .collect();

    let mut sections: [Option<String>; 5] = Default::default();
    for (i, pos) in positions.iter().enumerate() {
        let Some(start) = *pos else { continue };
        let body_start = start + RESPONSE_SECTION_HEADERS[i].len();

        let body_end = positions
            .iter()
            .filter_map(|p| *p)
            .filter(|&p| p > start)
            .min()
            .unwrap_or(raw.len());

        if body_start > body_end {
            continue; // header text overlaps the next header, treat as absent
        }

        let body = raw[body_start..body_end]
            .trim_start_matches(|c: char| c == ':' || c == '*' || c == '#' || c.is_whitespace())
            .trim_end_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
            .trim()
            .to_string();

        if !body.is_empty() {
            sections[i] = Some(body);
        }
    }
    sections
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`
///
/// Needles are the ASCII section headers, so a match can only begin on a
/// UTF-8 character boundary and the returned offset is always safe to
/// slice at.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

fn extract_insight(raw: &str, section: Option<&str>) -> (String, ExtractionStrategy) {
    if let Some(body) = section {
        return (body.to_string(), ExtractionStrategy::Header);
    }
    // Heuristic: the first paragraph usually carries the main point
    let first_paragraph = raw
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty());
    if let Some(paragraph) = first_paragraph {
        return (
            truncate_chars(paragraph, INSIGHT_FALLBACK_CHARS),
            ExtractionStrategy::Heuristic,
        );
    }
    (DEFAULT_INSIGHT.to_string(), ExtractionStrategy::Default)
}

fn extract_root_cause(raw: &str, section: Option<&str>) -> (String, ExtractionStrategy) {
    if let Some(body) = section {
        return (body.to_string(), ExtractionStrategy::Header);
    }
    // Heuristic: a causal sentence is the next best signal
    let causal = raw
        .split(['.', '\n'])
        .map(str::trim)
        .find(|s| {
            let lower = s.to_lowercase();
            !s.is_empty() && (lower.contains("because") || lower.contains("stems from"))
        });
    if let Some(sentence) = causal {
        return (sentence.to_string(), ExtractionStrategy::Heuristic);
    }
    (DEFAULT_ROOT_CAUSE.to_string(), ExtractionStrategy::Default)
}

fn extract_action_plan(raw: &str, section: Option<&str>) -> (Vec<ActionItem>, ExtractionStrategy) {
    if let Some(body) = section {
        let items = parse_numbered_items(body);
        if !items.is_empty() {
            return (items, ExtractionStrategy::Header);
        }
    }

    // Heuristic: numbered lines anywhere in the reply
    let items = parse_numbered_items(raw);
    if !items.is_empty() {
        return (items, ExtractionStrategy::Heuristic);
    }

    // Default: synthesize one item so the plan is never empty
    let summary = truncate_chars(raw.trim(), ACTION_FALLBACK_CHARS);
    let details = if summary.is_empty() {
        "The response contained no actionable steps; gather more observations and ask again."
            .to_string()
    } else {
        summary
    };
    (
        vec![ActionItem {
            priority: 1,
            action: "Review the full response".to_string(),
            details,
        }],
        ExtractionStrategy::Default,
    )
}

fn extract_timeline(raw: &str, section: Option<&str>) -> (String, ExtractionStrategy) {
    if let Some(body) = section {
        return (body.to_string(), ExtractionStrategy::Header);
    }
    // Heuristic: a sentence mentioning a duration
    let duration = raw
        .split(['.', '\n'])
        .map(str::trim)
        .find(|s| {
            let lower = s.to_lowercase();
            !s.is_empty()
                && (lower.contains("week") || lower.contains("month") || lower.contains(" days"))
        });
    if let Some(sentence) = duration {
        return (sentence.to_string(), ExtractionStrategy::Heuristic);
    }
    (DEFAULT_TIMELINE.to_string(), ExtractionStrategy::Default)
}

fn extract_talking_point(section: Option<&str>) -> (String, ExtractionStrategy) {
    if let Some(body) = section {
        return (body.to_string(), ExtractionStrategy::Header);
    }
    // No reliable heuristic for parent-facing phrasing; go straight to the default
    (
        DEFAULT_PARENT_TALKING_POINT.to_string(),
        ExtractionStrategy::Default,
    )
}

/// Split a block of text into numbered action items
///
/// An item starts at a line whose first token is digits followed by `.` or
/// `)`. Continuation lines attach to the current item. Priorities are
/// assigned by position, not by the literal numbers in the text.
fn parse_numbered_items(text: &str) -> Vec<ActionItem> {
    let mut bodies: Vec<String> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(body) = strip_item_marker(trimmed) {
            bodies.push(body.to_string());
        } else if !trimmed.is_empty() {
            if let Some(current) = bodies.last_mut() {
                current.push(' ');
                current.push_str(trimmed);
            }
        }
    }

    bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| match body.split_once(':') {
            Some((action, details)) if !action.trim().is_empty() => ActionItem {
                priority: i + 1,
                action: action.trim().to_string(),
                details: details.trim().to_string(),
            },
            _ => ActionItem {
                priority: i + 1,
                action: body.trim().to_string(),
                details: body.trim().to_string(),
            },
        })
        .collect()
}

/// Strip a leading `N.` / `N)` marker, returning the item body
fn strip_item_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    Some(rest.trim_start())
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
