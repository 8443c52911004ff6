//! Static replies used when the response generator is unavailable.

use super::guidance::CRISIS_RESOURCES_LINE;
use crate::domain::assessment::EmotionLabel;

const ANXIOUS: &str = "I can sense you're feeling anxious right now. Anxiety can be overwhelming, \
but there are ways to work through it. Let's start simply: try inhaling slowly for 4 counts, \
holding for 4, then exhaling for 6. This can help calm your nervous system.";

const SAD: &str = "I hear that you're feeling sad, and those feelings are valid. Sadness is a \
natural response to difficult situations. I'm having a technical hiccup, but you're not alone \
in this. What's been weighing most heavily on you?";

const ANGRY: &str = "It sounds like you're feeling frustrated or angry, and those are completely \
valid emotions. While I sort out a technical issue, I'm curious: what's been triggering these \
feelings for you?";

const FEAR: &str = "Fear can be such an intense emotion, and it sounds like you're experiencing \
that right now. Even with my connection issue, here's something that might help: name 5 things \
you can see, 4 you can touch, 3 you can hear, 2 you can smell and 1 you can taste.";

const NEUTRAL: &str = "I'm here and listening. I'm having a brief technical difficulty, but I \
don't want that to interrupt our conversation. You matter, and what you're sharing is important.";

const GROUNDING: &str = "**In the meantime, some grounding techniques that might help:**\n\
• Deep breathing: 4 seconds in, 7 seconds hold, 8 seconds out\n\
• Physical grounding: focus on how your feet feel on the floor\n\
• Sensory awareness: notice 3 things you can see, hear and feel\n\
• Reach out to someone you trust if you need immediate support";

fn opening_for(emotion: &EmotionLabel) -> &'static str {
    match emotion {
        EmotionLabel::Nervousness => ANXIOUS,
        EmotionLabel::Sadness | EmotionLabel::Grief => SAD,
        EmotionLabel::Anger | EmotionLabel::Annoyance => ANGRY,
        EmotionLabel::Fear => FEAR,
        EmotionLabel::Unknown(label) => match label.to_lowercase().as_str() {
            "anxious" => ANXIOUS,
            "sad" => SAD,
            "angry" => ANGRY,
            _ => NEUTRAL,
        },
        _ => NEUTRAL,
    }
}

/// Full fallback reply keyed by the dominant emotion.
pub fn fallback_reply(dominant_emotion: &EmotionLabel) -> String {
    format!(
        "{}\n\n{}\n\n**Crisis Resources (available 24/7):**\n{}",
        opening_for(dominant_emotion),
        GROUNDING,
        CRISIS_RESOURCES_LINE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_by_dominant_emotion() {
        assert!(fallback_reply(&EmotionLabel::Grief).starts_with(SAD));
        assert!(fallback_reply(&EmotionLabel::Nervousness).starts_with(ANXIOUS));
        assert!(fallback_reply(&EmotionLabel::Annoyance).starts_with(ANGRY));
        assert!(fallback_reply(&EmotionLabel::Fear).starts_with(FEAR));
    }

    #[test]
    fn legacy_keys_are_recognised() {
        assert!(fallback_reply(&EmotionLabel::parse("anxious")).starts_with(ANXIOUS));
    }

    #[test]
    fn defaults_to_neutral_and_always_lists_resources() {
        let reply = fallback_reply(&EmotionLabel::Joy);
        assert!(reply.starts_with(NEUTRAL));
        assert!(reply.contains("grounding techniques"));
        assert!(reply.ends_with(CRISIS_RESOURCES_LINE));
    }
}
