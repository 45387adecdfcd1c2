//! Prompt Enhancer module
//! Remote enhancement of drafted prompts and the Web UI that drives it

mod prompt_enhancer;
pub mod server;
pub mod templates;

pub use prompt_enhancer::{local_fallback, Enhancement, EnhancementSource, PromptEnhancer};
pub use server::FormServer;
pub use templates::{ENHANCE_INSTRUCTION_TEMPLATE, FALLBACK_SUFFIX, FORM_UI_HTML};
