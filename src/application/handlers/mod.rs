//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! storage and collaborator ports. Every time-dependent handler takes the
//! current time as an argument.

pub mod community;
pub mod engagement;
pub mod report;
pub mod session;
pub mod user;

pub use community::{
    AddGratitudeEntryCommand, AddGratitudeEntryHandler, CreatePostCommand, CreatePostHandler,
    ListGratitudeEntriesHandler, ListGratitudeEntriesQuery, ListPostsHandler, ReactToPostCommand,
    ReactToPostHandler,
};
pub use engagement::{
    AddCustomTaskCommand, AddCustomTaskHandler, CompleteBreathingExerciseCommand,
    CompleteBreathingExerciseHandler, CompleteTaskCommand, CompleteTaskHandler,
    RemoveCustomTaskCommand, RemoveCustomTaskHandler,
};
pub use report::{BuildReportHandler, BuildReportQuery, RenderReportHandler, RenderedReport};
pub use session::{
    AnalyzeBatchHandler, AnalyzeBatchQuery, AnalyzeTextCommand, AnalyzeTextHandler,
    CheckStalenessHandler, CheckStalenessQuery, ClearConversationCommand, ClearConversationHandler,
    ClearHistoryCommand, ClearHistoryHandler, SendChatMessageCommand, SendChatMessageHandler,
    SubmitQuestionnaireCommand, SubmitQuestionnaireHandler,
};
pub use user::{
    AuthenticateUserCommand, AuthenticateUserHandler, RegisterUserCommand, RegisterUserHandler,
};
