//! Prompt context handed to the response generator.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::domain::assessment::{
    CrisisLevel, DistressBand, EmotionLabel, EmotionPrediction, RiskScore,
};
use crate::domain::user::{ChatRole, ChatTurn};

/// Number of prior turns included in the prompt.
pub const CONTEXT_TURNS: usize = 8;

/// Characters kept from each prior turn.
pub const TURN_PREVIEW_CHARS: usize = 200;

/// Confidence assumed when nothing was classified.
const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStage {
    Early,
    Ongoing,
}

impl ConversationStage {
    /// Ongoing once more than two prior turns exist.
    pub fn from_history_len(len: usize) -> Self {
        if len > 2 {
            ConversationStage::Ongoing
        } else {
            ConversationStage::Early
        }
    }
}

/// Truncated prior turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Everything the generator needs to compose a reply.
///
/// `crisis_level` is always present so generators can adjust tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptContext {
    pub user_message: String,
    pub dominant_emotion: EmotionLabel,
    pub dominant_confidence: f64,
    pub risk_score: Option<RiskScore>,
    pub stage: ConversationStage,
    pub distress: DistressBand,
    pub crisis_level: CrisisLevel,
    pub recent_turns: Vec<PromptTurn>,
}

impl PromptContext {
    pub fn build(
        user_message: &str,
        predictions: &[EmotionPrediction],
        risk_score: Option<RiskScore>,
        crisis_level: CrisisLevel,
        history: &[ChatTurn],
    ) -> Self {
        let (dominant_emotion, dominant_confidence) = predictions
            .first()
            .map(|p| (p.label.clone(), p.confidence))
            .unwrap_or((EmotionLabel::Neutral, DEFAULT_CONFIDENCE));

        let start = history.len().saturating_sub(CONTEXT_TURNS);
        let recent_turns = history[start..]
            .iter()
            .map(|turn| PromptTurn {
                role: turn.role,
                content: turn.content.chars().take(TURN_PREVIEW_CHARS).collect(),
            })
            .collect();

        Self {
            user_message: user_message.to_string(),
            dominant_emotion,
            dominant_confidence,
            risk_score,
            stage: ConversationStage::from_history_len(history.len()),
            distress: risk_score
                .map(DistressBand::from_score)
                .unwrap_or(DistressBand::Stable),
            crisis_level,
            recent_turns,
        }
    }

    /// Renders the full instruction prompt as plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "You are an empathetic, warm and professional mental health support companion. \
             Hold a natural conversation that leaves the user feeling heard and supported."
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Guidelines:");
        let _ = writeln!(out, "1. Be conversational, like a thoughtful counselor rather than a script.");
        let _ = writeln!(out, "2. Acknowledge and validate feelings before suggesting anything.");
        let _ = writeln!(out, "3. Refer back to earlier parts of the conversation.");
        let _ = writeln!(out, "4. Ask at most one or two gentle follow-up questions.");
        let _ = writeln!(out, "5. Offer practical coping ideas or resources when they fit.");
        let _ = writeln!(out);
        let _ = writeln!(out, "Current context:");
        let _ = writeln!(
            out,
            "- Emotional state: {} (confidence: {:.1}%)",
            self.dominant_emotion,
            self.dominant_confidence * 100.0
        );
        match self.risk_score {
            Some(score) => {
                let _ = writeln!(out, "- Risk assessment: {}/100", score);
            }
            None => {
                let _ = writeln!(out, "- Risk assessment: unavailable");
            }
        }
        let stage = match self.stage {
            ConversationStage::Early => "early",
            ConversationStage::Ongoing => "ongoing",
        };
        let _ = writeln!(out, "- Conversation stage: {}", stage);
        let _ = writeln!(out, "- User seems to be: {}", self.distress.describe());
        let _ = writeln!(out, "- Crisis level: {}", self.crisis_level);
        if self.crisis_level == CrisisLevel::Critical {
            let _ = writeln!(
                out,
                "- This is a crisis. Respond to what they said with empathy first, \
                 then strongly encourage immediate professional help."
            );
        }

        if !self.recent_turns.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Previous conversation:");
            for turn in &self.recent_turns {
                let speaker = match turn.role {
                    ChatRole::User => "User",
                    ChatRole::Assistant => "You (Assistant)",
                };
                let _ = writeln!(out, "{}: {}", speaker, turn.content);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Current user message:");
        let _ = writeln!(out, "{}", self.user_message);
        out
    }
}
