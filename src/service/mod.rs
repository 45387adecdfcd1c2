//! Service modules for the remote enhancement transports

pub mod common;
pub(crate) mod inference;
pub(crate) mod router;

// Re-export commonly used items
pub use common::{
    extract_reply, map_auth_error, render_enhance_instruction, ChatMessage, Transport,
};
pub use inference::call_model_route_endpoint;
pub use router::call_router_endpoint;
