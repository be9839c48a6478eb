//! Prompt construction

pub mod assembler;
pub mod persona;

pub use assembler::{assemble, GuruPromptParts};
pub use persona::{FEW_SHOT_EXAMPLES, PERSONA_VERSION, RESPONSE_SECTION_HEADERS, SYSTEM_PROMPT};
