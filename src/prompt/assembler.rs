//! Deterministic prompt assembly
//!
//! Pure function of its inputs: no I/O, no randomness, no clock. The user
//! prompt concatenates, in fixed order: few-shot examples, rendered child
//! context, rendered references, the literal question, and a closing
//! instruction repeating the required section headers.

use serde::{Deserialize, Serialize};

use crate::context::types::ChildContext;
use crate::context::{render_child_context, render_knowledge};
use crate::prompt::persona::{FEW_SHOT_EXAMPLES, RESPONSE_SECTION_HEADERS, SYSTEM_PROMPT};
use crate::retrieval::KnowledgeResult;

/// The two-part prompt handed to the model-invocation boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuruPromptParts {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Assemble the prompt pair for one advisory request
pub fn assemble(
    question: &str,
    context: &ChildContext,
    knowledge: &KnowledgeResult,
) -> GuruPromptParts {
    let mut user_prompt = String::new();

    user_prompt.push_str(FEW_SHOT_EXAMPLES);
    user_prompt.push('\n');

    user_prompt.push_str(&render_child_context(context));
    user_prompt.push('\n');

    user_prompt.push_str(&render_knowledge(knowledge));
    user_prompt.push('\n');

    user_prompt.push_str(&format!("QUESTION: {}\n\n", question.trim()));

    user_prompt.push_str(&format!(
        "Answer now using exactly these sections, in order: {}.",
        RESPONSE_SECTION_HEADERS.join(", ")
    ));

    GuruPromptParts {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt,
    }
}
