//! Engagement command handlers: tasks, custom tasks and breathing exercises.

mod breathing_exercise;
mod complete_task;
mod custom_tasks;

pub use breathing_exercise::{
    CompleteBreathingExerciseCommand, CompleteBreathingExerciseHandler,
    CompleteBreathingExerciseResult,
};
pub use complete_task::{CompleteTaskCommand, CompleteTaskHandler, CompleteTaskResult};
pub use custom_tasks::{
    AddCustomTaskCommand, AddCustomTaskHandler, RemoveCustomTaskCommand, RemoveCustomTaskHandler,
};
