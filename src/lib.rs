//! promptcraft library - multi-level prompt builder with remote enhancement

pub mod assembler;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod export;
pub mod http_logger;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use assembler::{assemble, assemble_for, Level, UserInput};
pub use config::{Config, ConfigOptions};
pub use enhancer::{Enhancement, EnhancementSource, FormServer, PromptEnhancer};
pub use error::{ConfigError, EnhanceError};
pub use session::{FormSession, GeneratedPrompt, GenerationState, SessionError};
