//! CompleteBreathingExerciseHandler - Fixed XP award for a finished exercise.

use std::sync::Arc;

use crate::domain::engagement::BREATHING_EXERCISE_XP;
use crate::domain::foundation::{DomainError, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

#[derive(Debug, Clone)]
pub struct CompleteBreathingExerciseCommand {
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteBreathingExerciseResult {
    pub awarded_xp: u32,
    pub xp: u32,
    pub level: u32,
}

/// Awards XP each time; breathing exercises are not limited per day.
pub struct CompleteBreathingExerciseHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl CompleteBreathingExerciseHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: CompleteBreathingExerciseCommand,
    ) -> Result<CompleteBreathingExerciseResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        self.users
            .with_user(&username, |profile| {
                profile.engagement.add_xp(BREATHING_EXERCISE_XP);
                Ok(CompleteBreathingExerciseResult {
                    awarded_xp: BREATHING_EXERCISE_XP,
                    xp: profile.engagement.xp,
                    level: profile.engagement.level,
                })
            })
            .await
    }
}
