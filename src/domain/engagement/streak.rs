//! Consecutive-day activity streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of a single check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// First ever check-in.
    Started,
    /// Already checked in today (or the date went backwards).
    Unchanged,
    /// Checked in the day after the last check-in.
    Extended,
    /// Gap of two or more days; streak restarted at 1.
    Reset,
}

/// Streak state persisted on the user profile.
///
/// Field names match the persisted profile layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(rename = "streak_count", default)]
    pub count: u32,
    #[serde(rename = "longest_streak", default)]
    pub longest: u32,
    #[serde(rename = "last_checkin_date", default)]
    pub last_checkin: Option<NaiveDate>,
}

impl Streak {
    /// Applies a check-in for `today`.
    pub fn check_in(&mut self, today: NaiveDate) -> CheckInOutcome {
        let outcome = match self.last_checkin {
            None => {
                self.count = 1;
                CheckInOutcome::Started
            }
            Some(last) => {
                let gap = (today - last).num_days();
                match gap {
                    g if g <= 0 => return CheckInOutcome::Unchanged,
                    1 => {
                        self.count += 1;
                        CheckInOutcome::Extended
                    }
                    _ => {
                        self.count = 1;
                        CheckInOutcome::Reset
                    }
                }
            }
        };
        self.longest = self.longest.max(self.count);
        self.last_checkin = Some(today);
        outcome
    }
}
