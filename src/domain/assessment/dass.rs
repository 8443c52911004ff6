//! DASS-42 questionnaire scoring and severity classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Number of items in the questionnaire.
pub const QUESTION_COUNT: usize = 42;

/// Items per display group.
pub const GROUP_SIZE: usize = 14;

/// Highest allowed answer value.
pub const MAX_ANSWER: u8 = 3;

/// Minimum completion required before a submission is scored.
pub const SUBMISSION_THRESHOLD_PERCENT: f64 = 65.0;

/// Clinical category measured by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DassCategory {
    Depression,
    Anxiety,
    Stress,
}

impl DassCategory {
    /// Categories in tie-break and display order.
    pub const ALL: [DassCategory; 3] = [
        DassCategory::Depression,
        DassCategory::Anxiety,
        DassCategory::Stress,
    ];

    /// Zero-based scoring key over the flattened response set.
    ///
    /// Indices outside the response set are skipped when summing.
    pub fn scoring_indices(&self) -> &'static [usize] {
        match self {
            DassCategory::Depression => &[2, 4, 9, 12, 15, 16, 20, 23, 24, 26, 30, 33, 36, 41],
            DassCategory::Anxiety => &[1, 6, 8, 14, 18, 19, 22, 28, 29, 31, 34, 37, 38, 40],
            DassCategory::Stress => &[0, 5, 7, 10, 11, 13, 17, 21, 25, 27, 32, 35, 39, 42],
        }
    }

    /// Inclusive upper bounds for Normal, Mild, Moderate and Severe.
    fn cut_points(&self) -> [u32; 4] {
        match self {
            DassCategory::Depression => [9, 13, 20, 27],
            DassCategory::Anxiety => [7, 9, 14, 19],
            DassCategory::Stress => [14, 18, 25, 33],
        }
    }

    pub fn classify(&self, score: u32) -> Severity {
        let [normal, mild, moderate, severe] = self.cut_points();
        if score <= normal {
            Severity::Normal
        } else if score <= mild {
            Severity::Mild
        } else if score <= moderate {
            Severity::Moderate
        } else if score <= severe {
            Severity::Severe
        } else {
            Severity::ExtremelySevere
        }
    }

    /// Item texts shown for this category's display group.
    pub fn display_items(&self) -> &'static [&'static str; GROUP_SIZE] {
        match self {
            DassCategory::Depression => &DEPRESSION_ITEMS,
            DassCategory::Anxiety => &ANXIETY_ITEMS,
            DassCategory::Stress => &STRESS_ITEMS,
        }
    }
}

impl fmt::Display for DassCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DassCategory::Depression => write!(f, "Depression"),
            DassCategory::Anxiety => write!(f, "Anxiety"),
            DassCategory::Stress => write!(f, "Stress"),
        }
    }
}

/// Severity band, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    #[serde(rename = "Extremely Severe")]
    ExtremelySevere,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "Normal"),
            Severity::Mild => write!(f, "Mild"),
            Severity::Moderate => write!(f, "Moderate"),
            Severity::Severe => write!(f, "Severe"),
            Severity::ExtremelySevere => write!(f, "Extremely Severe"),
        }
    }
}

/// 42 optional answers, flattened in display-group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<u8>>", into = "Vec<Option<u8>>")]
pub struct QuestionnaireResponseSet(Vec<Option<u8>>);

impl QuestionnaireResponseSet {
    /// Builds a response set from exactly 42 optional answers.
    ///
    /// # Errors
    /// Wrong length or any answer above 3.
    pub fn new(answers: Vec<Option<u8>>) -> Result<Self, ValidationError> {
        if answers.len() != QUESTION_COUNT {
            return Err(ValidationError::out_of_range(
                "responses",
                QUESTION_COUNT as i64,
                QUESTION_COUNT as i64,
                answers.len() as i64,
            ));
        }
        if let Some(bad) = answers.iter().flatten().find(|a| **a > MAX_ANSWER) {
            return Err(ValidationError::out_of_range(
                "answer",
                0,
                MAX_ANSWER as i64,
                *bad as i64,
            ));
        }
        Ok(Self(answers))
    }

    /// A response set with nothing answered.
    pub fn empty() -> Self {
        Self(vec![None; QUESTION_COUNT])
    }

    /// Flattens three display groups (Depression, Anxiety, Stress).
    pub fn from_groups(
        depression: [Option<u8>; GROUP_SIZE],
        anxiety: [Option<u8>; GROUP_SIZE],
        stress: [Option<u8>; GROUP_SIZE],
    ) -> Result<Self, ValidationError> {
        let mut answers = Vec::with_capacity(QUESTION_COUNT);
        answers.extend_from_slice(&depression);
        answers.extend_from_slice(&anxiety);
        answers.extend_from_slice(&stress);
        Self::new(answers)
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied().flatten()
    }

    pub fn answered(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    /// `answered / 42 × 100`.
    pub fn completion_percentage(&self) -> f64 {
        self.answered() as f64 / QUESTION_COUNT as f64 * 100.0
    }

    pub fn meets_submission_threshold(&self) -> bool {
        self.completion_percentage() >= SUBMISSION_THRESHOLD_PERCENT
    }

    /// `2 × Σ answers` over the category's scoring key.
    pub fn category_score(&self, category: DassCategory) -> u32 {
        let raw: u32 = category
            .scoring_indices()
            .iter()
            .filter_map(|&i| self.get(i))
            .map(u32::from)
            .sum();
        raw * 2
    }
}

impl TryFrom<Vec<Option<u8>>> for QuestionnaireResponseSet {
    type Error = ValidationError;

    fn try_from(value: Vec<Option<u8>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionnaireResponseSet> for Vec<Option<u8>> {
    fn from(value: QuestionnaireResponseSet) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DassScores {
    pub depression: u32,
    pub anxiety: u32,
    pub stress: u32,
}

impl DassScores {
    pub fn get(&self, category: DassCategory) -> u32 {
        match category {
            DassCategory::Depression => self.depression,
            DassCategory::Anxiety => self.anxiety,
            DassCategory::Stress => self.stress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DassSeverities {
    pub depression: Severity,
    pub anxiety: Severity,
    pub stress: Severity,
}

impl DassSeverities {
    pub fn get(&self, category: DassCategory) -> Severity {
        match category {
            DassCategory::Depression => self.depression,
            DassCategory::Anxiety => self.anxiety,
            DassCategory::Stress => self.stress,
        }
    }
}

/// A scored questionnaire submission. Immutable once appended to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DassResult {
    pub timestamp: Timestamp,
    pub scores: DassScores,
    pub severity: DassSeverities,
    pub completion_percentage: f64,
}

impl DassResult {
    /// Scores a response set. Does not apply the submission gate.
    pub fn score(responses: &QuestionnaireResponseSet, now: Timestamp) -> Self {
        let scores = DassScores {
            depression: responses.category_score(DassCategory::Depression),
            anxiety: responses.category_score(DassCategory::Anxiety),
            stress: responses.category_score(DassCategory::Stress),
        };
        let severity = DassSeverities {
            depression: DassCategory::Depression.classify(scores.depression),
            anxiety: DassCategory::Anxiety.classify(scores.anxiety),
            stress: DassCategory::Stress.classify(scores.stress),
        };
        Self {
            timestamp: now,
            scores,
            severity,
            completion_percentage: responses.completion_percentage(),
        }
    }

    /// Most severe category; ties resolve to the first of Depression, Anxiety, Stress.
    pub fn overall(&self) -> (DassCategory, Severity) {
        DassCategory::ALL
            .iter()
            .fold(None::<(DassCategory, Severity)>, |best, &cat| {
                let sev = self.severity.get(cat);
                match best {
                    Some((_, best_sev)) if best_sev >= sev => best,
                    _ => Some((cat, sev)),
                }
            })
            .unwrap_or((DassCategory::Depression, self.severity.depression))
    }
}

static DEPRESSION_ITEMS: [&str; GROUP_SIZE] = [
    "I couldn't seem to experience any positive feeling at all",
    "I found it difficult to work up the initiative to do things",
    "I felt that I had nothing to look forward to",
    "I felt down-hearted and blue",
    "I was unable to become enthusiastic about anything",
    "I felt I wasn't worth much as a person",
    "I felt that life was meaningless",
    "I found it hard to wind down",
    "I was aware of dryness of my mouth",
    "I couldn't seem to get going",
    "I felt sad and depressed",
    "I felt that I had lost interest in just about everything",
    "I felt I was pretty worthless",
    "I could see nothing in the future to be hopeful about",
];

static ANXIETY_ITEMS: [&str; GROUP_SIZE] = [
    "I was aware of the action of my heart in the absence of physical exertion",
    "I experienced breathing difficulty (e.g., excessively rapid breathing, breathlessness)",
    "I experienced trembling (e.g., in the hands)",
    "I was worried about situations in which I might panic and make a fool of myself",
    "I felt I was close to panic",
    "I was aware of dryness of my mouth",
    "I experienced difficulty in breathing",
    "I had a feeling of shakiness (e.g., legs going to give way)",
    "I found myself in situations that made me so anxious I was most relieved when they ended",
    "I felt scared without any good reason",
    "I felt terrified",
    "I was worried about situations in which I might panic",
    "I felt I was close to panic",
    "I was aware I had a dry mouth",
];

static STRESS_ITEMS: [&str; GROUP_SIZE] = [
    "I found it hard to wind down",
    "I tended to over-react to situations",
    "I felt that I was using a lot of nervous energy",
    "I found myself getting agitated",
    "I found it difficult to relax",
    "I was intolerant of anything that kept me from getting on with what I was doing",
    "I felt that I was rather touchy",
    "I found it difficult to tolerate interruptions to what I was doing",
    "I was in a state of nervous tension",
    "I found it hard to calm down after something upset me",
    "I found it difficult to tolerate interruptions",
    "I was intolerant of things that kept me from getting on",
    "I found myself getting upset rather easily",
    "I felt that I was rather touchy",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn with_answers(pairs: &[(usize, u8)]) -> QuestionnaireResponseSet {
        let mut answers = vec![None; QUESTION_COUNT];
        for &(i, v) in pairs {
            answers[i] = Some(v);
        }
        QuestionnaireResponseSet::new(answers).unwrap()
    }

    fn answered_count(count: usize) -> QuestionnaireResponseSet {
        let mut answers = vec![None; QUESTION_COUNT];
        for slot in answers.iter_mut().take(count) {
            *slot = Some(0);
        }
        QuestionnaireResponseSet::new(answers).unwrap()
    }

    #[test]
    fn depression_raw_ten_is_moderate() {
        // 3+3+3+1 on depression indices
        let responses = with_answers(&[(2, 3), (4, 3), (9, 3), (12, 1)]);
        let result = DassResult::score(&responses, Timestamp::now());
        assert_eq!(result.scores.depression, 20);
        assert_eq!(result.severity.depression, Severity::Moderate);
    }

    #[test]
    fn depression_raw_fourteen_is_extremely_severe() {
        let responses = with_answers(&[(2, 3), (4, 3), (9, 3), (12, 3), (15, 2)]);
        let result = DassResult::score(&responses, Timestamp::now());
        assert_eq!(result.scores.depression, 28);
        assert_eq!(result.severity.depression, Severity::ExtremelySevere);
    }

    #[test]
    fn depression_severe_band_ends_at_twenty_seven() {
        assert_eq!(DassCategory::Depression.classify(21), Severity::Severe);
        assert_eq!(DassCategory::Depression.classify(27), Severity::Severe);
        assert_eq!(DassCategory::Depression.classify(28), Severity::ExtremelySevere);
    }

    #[test]
    fn unscored_and_out_of_range_indices_contribute_nothing() {
        let responses = with_answers(&[(3, 3)]);
        let result = DassResult::score(&responses, Timestamp::now());
        assert_eq!(result.scores, DassScores { depression: 0, anxiety: 0, stress: 0 });
    }

    #[test]
    fn scores_are_always_even() {
        let responses = with_answers(&[(0, 1), (1, 1), (2, 1)]);
        let result = DassResult::score(&responses, Timestamp::now());
        assert_eq!(result.scores.depression % 2, 0);
        assert_eq!(result.scores.anxiety % 2, 0);
        assert_eq!(result.scores.stress % 2, 0);
    }

    #[test]
    fn submission_gate_boundary() {
        assert!(!answered_count(27).meets_submission_threshold());
        assert!(answered_count(28).meets_submission_threshold());
    }

    #[test]
    fn cut_points_are_inclusive_upper_bounds() {
        assert_eq!(DassCategory::Anxiety.classify(7), Severity::Normal);
        assert_eq!(DassCategory::Anxiety.classify(8), Severity::Mild);
        assert_eq!(DassCategory::Anxiety.classify(20), Severity::ExtremelySevere);
        assert_eq!(DassCategory::Stress.classify(14), Severity::Normal);
        assert_eq!(DassCategory::Stress.classify(33), Severity::Severe);
        assert_eq!(DassCategory::Stress.classify(34), Severity::ExtremelySevere);
    }

    #[test]
    fn overall_picks_most_severe_with_ordered_ties() {
        // Anxiety 8 (Mild), Stress 16 (Mild), Depression 0 (Normal)
        let responses = with_answers(&[(1, 3), (6, 1), (0, 3), (5, 3), (7, 2)]);
        let result = DassResult::score(&responses, Timestamp::now());
        assert_eq!(result.severity.anxiety, Severity::Mild);
        assert_eq!(result.severity.stress, Severity::Mild);
        assert_eq!(result.overall(), (DassCategory::Anxiety, Severity::Mild));
    }

    #[test]
    fn all_normal_overall_is_depression() {
        let result = DassResult::score(&QuestionnaireResponseSet::empty(), Timestamp::now());
        assert_eq!(result.overall(), (DassCategory::Depression, Severity::Normal));
    }

    #[test]
    fn rejects_answers_above_three() {
        let mut answers = vec![None; QUESTION_COUNT];
        answers[0] = Some(4);
        assert!(matches!(
            QuestionnaireResponseSet::new(answers),
            Err(ValidationError::OutOfRange { actual: 4, .. })
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(QuestionnaireResponseSet::new(vec![Some(1); 41]).is_err());
    }

    #[test]
    fn from_groups_flattens_in_display_order() {
        let mut stress = [None; GROUP_SIZE];
        stress[0] = Some(2);
        let set = QuestionnaireResponseSet::from_groups([None; GROUP_SIZE], [None; GROUP_SIZE], stress)
            .unwrap();
        assert_eq!(set.get(28), Some(2));
        assert_eq!(set.answered(), 1);
    }

    #[test]
    fn severity_serializes_with_display_names() {
        let json = serde_json::to_string(&Severity::ExtremelySevere).unwrap();
        assert_eq!(json, "\"Extremely Severe\"");
    }

    #[test]
    fn every_group_has_fourteen_items() {
        for category in DassCategory::ALL {
            assert_eq!(category.display_items().len(), GROUP_SIZE);
        }
    }
}
