//! Conversation module - prompt context, support guidance and fallbacks
//! for the supportive chat.

mod fallback;
mod guidance;
mod prompt;

pub use fallback::fallback_reply;
pub use guidance::{append_support_guidance, CRISIS_RESOURCES_LINE, MIN_REPLY_CHARS};
pub use prompt::{ConversationStage, PromptContext, PromptTurn, CONTEXT_TURNS, TURN_PREVIEW_CHARS};
