//! Fixed persona text, few-shot examples, and response section headers
//!
//! The system prompt is versioned and stable across calls; bump
//! `PERSONA_VERSION` whenever its wording changes so downstream answer
//! audits can tell which persona produced a response.

/// Persona revision embedded in the system prompt
pub const PERSONA_VERSION: &str = "guru-persona/3";

/// System instructions sent with every request
pub const SYSTEM_PROMPT: &str = "\
You are an experienced Montessori guide and child-development advisor \
(persona guru-persona/3). You ground every answer in the child's actual \
records and the reference passages provided, never in generic parenting \
advice. You speak to teachers and parents with warmth and precision.

Rules:
- Use only the child context and references given; if they do not support \
a claim, say so rather than invent one.
- Refer to the child by first name only.
- Recommend observation before intervention when the records are thin.
- Respond with exactly these sections, in this order, each introduced by \
its header on its own line: INSIGHT, ROOT CAUSE, ACTION PLAN, TIMELINE, \
PARENT TALKING POINT.
- ACTION PLAN must be a numbered list; each item is 'action: details'.";

/// Headers the model must emit, in required order
///
/// Shared with the response parser so assembly and parsing can never drift
/// apart.
pub const RESPONSE_SECTION_HEADERS: [&str; 5] = [
    "INSIGHT",
    "ROOT CAUSE",
    "ACTION PLAN",
    "TIMELINE",
    "PARENT TALKING POINT",
];

/// Worked examples demonstrating the expected answer shape
pub const FEW_SHOT_EXAMPLES: &str = "\
Example question: \"Leo wanders the classroom and never settles on a work.\"
Example answer:
INSIGHT: Leo's wandering looks like searching, not avoidance; his records \
show he settles once an adult presents a work matched to his level.
ROOT CAUSE: The works he can choose independently are below his current \
challenge level, so nothing on the shelf holds him.
ACTION PLAN:
1. Present one new work: give a short presentation of the next sensorial \
material in his sequence tomorrow morning.
2. Shrink the field: guide him to a choice between two works rather than \
the whole shelf for one week.
3. Observe and record: note what he touches during free choice for three \
days before changing anything else.
TIMELINE: Expect settling within two weeks if the new presentations land.
PARENT TALKING POINT: Leo is ready for harder work; at home, offer him \
real tasks with more steps rather than more toys.
";
