//! Markdown report renderer.
//!
//! Renders a report snapshot as a single Markdown document, one section per
//! part of the snapshot.

use crate::domain::assessment::{DassCategory, DassResult, Severity};
use crate::domain::conversation::CRISIS_RESOURCES_LINE;
use crate::domain::report::ReportSnapshot;
use crate::domain::user::ChatRole;
use crate::ports::{RenderError, ReportRenderer};

/// Renders report snapshots as UTF-8 Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportRenderer;

impl MarkdownReportRenderer {
    pub fn new() -> Self {
        Self
    }

    fn generate_header(&self, snapshot: &ReportSnapshot) -> String {
        let mut section = String::from("# Mental Health Report\n\n");
        section.push_str(&format!("**Generated:** {}\n\n", snapshot.generated_at));

        let period = match (snapshot.range.from, snapshot.range.to) {
            (None, None) => "All time".to_string(),
            (Some(from), None) => format!("From {}", from),
            (None, Some(to)) => format!("Up to {}", to),
            (Some(from), Some(to)) => format!("{} to {}", from, to),
        };
        section.push_str(&format!("**Period:** {}\n\n", period));
        section
    }

    fn generate_profile(&self, snapshot: &ReportSnapshot) -> String {
        let profile = &snapshot.profile;
        let mut section = String::from("## Profile\n\n");
        section.push_str(&format!("- **Username:** {}\n", profile.username));
        section.push_str(&format!("- **Email:** {}\n", profile.email));
        section.push_str(&format!("- **Member since:** {}\n", profile.registered_at));
        if let Some(last_login) = profile.last_login_at {
            section.push_str(&format!("- **Last login:** {}\n", last_login));
        }
        section.push_str(&format!("- **Analyses performed:** {}\n", profile.analysis_count));
        section.push_str(&format!(
            "- **DASS-42 completed:** {}\n\n",
            if profile.dass_completed { "Yes" } else { "No" }
        ));
        section
    }

    fn generate_dass(&self, snapshot: &ReportSnapshot) -> String {
        let mut section = String::from("## DASS-42 Assessment\n\n");

        let Some(latest) = &snapshot.latest_dass else {
            section.push_str("*No assessments in this period*\n\n");
            return section;
        };

        section.push_str(&format!("### Latest ({})\n\n", latest.timestamp));
        section.push_str("| Scale | Score | Severity |\n");
        section.push_str("|-------|-------|----------|\n");
        for category in DassCategory::ALL {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                category,
                latest.scores.get(category),
                latest.severity.get(category)
            ));
        }
        section.push('\n');
        section.push_str(&self.generate_recommendations(latest));

        if snapshot.dass_results.len() > 1 {
            section.push_str("### History\n\n");
            section.push_str("| Date | Depression | Anxiety | Stress |\n");
            section.push_str("|------|------------|---------|--------|\n");
            for result in &snapshot.dass_results {
                section.push_str(&format!(
                    "| {} | {} ({}) | {} ({}) | {} ({}) |\n",
                    result.timestamp.date(),
                    result.scores.depression,
                    result.severity.depression,
                    result.scores.anxiety,
                    result.severity.anxiety,
                    result.scores.stress,
                    result.severity.stress
                ));
            }
            section.push('\n');
        }
        section
    }

    fn generate_recommendations(&self, result: &DassResult) -> String {
        let (_, severity) = result.overall();
        let mut section = String::from("### Recommendations\n\n");
        let items: &[&str] = match severity {
            Severity::Severe | Severity::ExtremelySevere => &[
                "Contact a mental health professional immediately",
                "Speak with your primary care physician",
                "Reach out to crisis helplines if needed",
            ],
            Severity::Moderate => &[
                "Schedule an appointment with a therapist or counselor",
                "Practice stress management techniques regularly",
                "Maintain healthy sleep, exercise, and nutrition habits",
            ],
            Severity::Normal | Severity::Mild => &[
                "Keep up with healthy coping mechanisms",
                "Regular self-care and stress management",
                "Monitor for any changes in symptoms",
            ],
        };
        for item in items {
            section.push_str(&format!("- {}\n", item));
        }
        if severity >= Severity::Severe {
            section.push_str(&format!("\n**Crisis helplines:** {}\n", CRISIS_RESOURCES_LINE));
        }
        section.push('\n');
        section
    }

    fn generate_emotions(&self, snapshot: &ReportSnapshot) -> String {
        let stats = &snapshot.emotion_statistics;
        let mut section = String::from("## Emotion Analysis\n\n");

        if stats.entry_count == 0 {
            section.push_str("*No emotion analyses in this period*\n\n");
            return section;
        }

        section.push_str(&format!("- **Analyses:** {}\n", stats.entry_count));
        if let Some(average) = stats.average_risk {
            section.push_str(&format!("- **Average risk score:** {}/100\n", average));
        }
        section.push_str(&format!("- **High-risk entries:** {}\n", stats.high_risk_count));
        if let Some(emotion) = &stats.most_common_emotion {
            section.push_str(&format!("- **Most common emotion:** {}\n", emotion));
        }
        section.push('\n');

        section.push_str("### Recent Entries\n\n");
        section.push_str("| Time | Dominant Emotion | Risk Score |\n");
        section.push_str("|------|------------------|------------|\n");
        for entry in &snapshot.recent_emotions {
            let dominant = entry
                .dominant()
                .map(|p| format!("{} ({:.0}%)", p.label, p.confidence * 100.0))
                .unwrap_or_else(|| "-".to_string());
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                entry.timestamp, dominant, entry.risk_score
            ));
        }
        section.push('\n');
        section
    }

    fn generate_engagement(&self, snapshot: &ReportSnapshot) -> String {
        let engagement = &snapshot.engagement;
        let mut section = String::from("## Engagement\n\n");
        section.push_str(&format!("- **Level:** {} ({} XP)\n", engagement.level, engagement.xp));
        section.push_str(&format!(
            "- **Current streak:** {} day(s)\n",
            engagement.current_streak
        ));
        section.push_str(&format!(
            "- **Longest streak:** {} day(s)\n\n",
            engagement.longest_streak
        ));

        if !engagement.tasks_completed.is_empty() {
            section.push_str("### Tasks Completed\n\n");
            for task in &engagement.tasks_completed {
                section.push_str(&format!("- [x] {} ({})\n", task.label, task.date));
            }
            section.push('\n');
        }
        section
    }

    fn generate_conversation(&self, snapshot: &ReportSnapshot) -> String {
        if snapshot.recent_chat.is_empty() {
            return String::new();
        }

        let mut section = String::from("## Recent Conversation\n\n");
        for turn in &snapshot.recent_chat {
            let speaker = match turn.role {
                ChatRole::User => "You",
                ChatRole::Assistant => "Companion",
            };
            section.push_str(&format!("**{}** ({}):\n", speaker, turn.timestamp));
            for line in turn.content.lines() {
                section.push_str(&format!("> {}\n", line));
            }
            section.push('\n');
        }
        section
    }
}

impl ReportRenderer for MarkdownReportRenderer {
    fn content_type(&self) -> &'static str {
        "text/markdown"
    }

    fn render(&self, snapshot: &ReportSnapshot) -> Result<Vec<u8>, RenderError> {
        let mut doc = String::new();
        doc.push_str(&self.generate_header(snapshot));
        doc.push_str(&self.generate_profile(snapshot));
        doc.push_str(&self.generate_dass(snapshot));
        doc.push_str(&self.generate_emotions(snapshot));
        doc.push_str(&self.generate_engagement(snapshot));
        doc.push_str(&self.generate_conversation(snapshot));
        doc.push_str("---\n\n");
        doc.push_str(
            "*This report is informational and is not a clinical diagnosis. \
             If you are struggling, please reach out to a qualified professional.*\n",
        );
        Ok(doc.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{EmotionPrediction, QuestionnaireResponseSet, RiskScore};
    use crate::domain::foundation::{Timestamp, Username};
    use crate::domain::report::DateRange;
    use crate::domain::user::{ChatTurn, CredentialDigest, EmotionLogEntry, Origin, UserProfile};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::new(
            Username::new("river").unwrap(),
            CredentialDigest::from_password("pw").unwrap(),
            "river@example.com".to_string(),
            ts("2024-01-01T08:00:00Z"),
        )
    }

    fn render(profile: &UserProfile) -> String {
        let snapshot = ReportSnapshot::build(profile, DateRange::all(), ts("2024-02-01T00:00:00Z"));
        let bytes = MarkdownReportRenderer::new().render(&snapshot).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn empty_profile_renders_placeholders() {
        let doc = render(&profile());
        assert!(doc.starts_with("# Mental Health Report"));
        assert!(doc.contains("**Username:** river"));
        assert!(doc.contains("*No assessments in this period*"));
        assert!(doc.contains("*No emotion analyses in this period*"));
        assert!(!doc.contains("## Recent Conversation"));
    }

    #[test]
    fn severe_assessment_lists_helplines() {
        let mut p = profile();
        let all_max = QuestionnaireResponseSet::new(vec![Some(3); 42]).unwrap();
        p.record_dass(DassResult::score(&all_max, ts("2024-01-05T10:00:00Z")));

        let doc = render(&p);
        assert!(doc.contains("| Depression |"));
        assert!(doc.contains("Contact a mental health professional immediately"));
        assert!(doc.contains(CRISIS_RESOURCES_LINE));
    }

    #[test]
    fn emotions_and_chat_are_listed() {
        let mut p = profile();
        p.record_emotion(EmotionLogEntry {
            timestamp: ts("2024-01-02T09:00:00Z"),
            source_text: "rough day".to_string(),
            predictions: vec![EmotionPrediction::from_classification("sadness", 0.8)],
            risk_score: RiskScore::new(72.0),
            origin: Origin::DirectAnalysis,
        });
        p.chat_history
            .push(ChatTurn::user("hello\nthere", ts("2024-01-02T10:00:00Z")));

        let doc = render(&p);
        assert!(doc.contains("**Most common emotion:** sadness"));
        assert!(doc.contains("**High-risk entries:** 1"));
        assert!(doc.contains("> hello\n> there"));
    }

    #[test]
    fn content_type_is_markdown() {
        assert_eq!(MarkdownReportRenderer::new().content_type(), "text/markdown");
    }
}
