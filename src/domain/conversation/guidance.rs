//! Support guidance appended to generated replies.

use crate::domain::assessment::{CrisisLevel, EmotionLabel, RiskScore};

/// Replies shorter than this get a follow-up invitation.
pub const MIN_REPLY_CHARS: usize = 100;

const SELF_CARE_SCORE: f64 = 50.0;

pub const CRISIS_RESOURCES_LINE: &str = "NIMHANS: 080-46110007 | TELE MANAS: 14416";

const URGENT_BLOCK: &str = "**I'm very concerned about your safety right now.** I'm here to listen, \
and I also need you to reach out for professional help immediately. These trained people can give \
you the urgent support you deserve:\n\n\
- **NIMHANS Crisis Helpline:** 080-46110007\n\
- **TELE MANAS (24/7):** 14416\n\
- **Emergency Services:** 112\n\n\
Please call one of these numbers right now. You don't have to face this alone. \
Is there someone close to you that you can reach out to as well?";

const PROFESSIONAL_NOTE: &str = "I'm noticing some patterns in what you're sharing that concern me. \
You're carrying a lot, and speaking with a mental health professional could really help. \
Would you be open to exploring that?";

const SELF_CARE_NOTE: &str = "Remember, caring for your mental health matters as much as your \
physical health. If things feel overwhelming, a counselor or therapist can offer valuable support.";

/// Appends escalation guidance and, for short replies, a follow-up invitation.
pub fn append_support_guidance(
    reply: &str,
    crisis_level: CrisisLevel,
    risk_score: Option<RiskScore>,
    dominant_emotion: &EmotionLabel,
) -> String {
    let mut out = reply.trim().to_string();
    let score = risk_score.map(|s| s.value()).unwrap_or(0.0);

    match crisis_level {
        CrisisLevel::Critical => {
            out.push_str("\n\n");
            out.push_str(URGENT_BLOCK);
        }
        CrisisLevel::Elevated => {
            out.push_str("\n\n");
            out.push_str(PROFESSIONAL_NOTE);
            out.push_str("\n\n**Professional Support:** ");
            out.push_str(CRISIS_RESOURCES_LINE);
        }
        CrisisLevel::None if score > SELF_CARE_SCORE => {
            out.push_str("\n\n");
            out.push_str(SELF_CARE_NOTE);
        }
        CrisisLevel::None => {}
    }

    if out.chars().count() < MIN_REPLY_CHARS {
        out.push_str(&format!(
            "\n\nI'm here to listen and support you. What you're experiencing with {} is valid, \
             and I'd like to understand more. Can you tell me a bit more about what's been on your mind?",
            dominant_emotion
        ));
    }
    out
}
