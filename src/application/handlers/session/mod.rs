//! Session command and query handlers: single and bulk analysis, questionnaire,
//! chat and history maintenance.

mod analyze_batch;
mod analyze_text;
mod check_staleness;
mod clear_history;
mod send_chat_message;
mod submit_questionnaire;

pub use analyze_batch::{
    AnalyzeBatchHandler, AnalyzeBatchQuery, AnalyzeBatchResult, BatchEntry, BatchOutcome,
    BatchSummary, PREVIEW_CHARS,
};
pub use analyze_text::{AnalyzeTextCommand, AnalyzeTextHandler, AnalyzeTextResult};
pub use check_staleness::{
    CheckStalenessHandler, CheckStalenessQuery, StalenessStatus, DEFAULT_STALENESS_HOURS,
};
pub use clear_history::{
    ClearConversationCommand, ClearConversationHandler, ClearHistoryCommand, ClearHistoryHandler,
};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult};
pub use submit_questionnaire::{
    SubmitQuestionnaireCommand, SubmitQuestionnaireHandler, SubmitQuestionnaireResult,
};

/// Trims and collapses runs of whitespace to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
