//! Exam content entities and the scoring rules.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Marks awarded for a correct answer (JEE marking scheme)
pub const MARKS_CORRECT: i32 = 4;
/// Marks deducted for a wrong answer
pub const PENALTY_WRONG: i32 = 1;

/// Kind of exam question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq,
    Numerical,
    Text,
    Paragraph,
    CaseBased,
}

impl QuestionKind {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mcq => "MCQ",
            Self::Numerical => "Numerical",
            Self::Text => "Short Answer",
            Self::Paragraph => "Paragraph",
            Self::CaseBased => "Case Based",
        }
    }
}

/// A single exam question as returned by the generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(rename = "correctOption")]
    pub correct_option: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
    /// Descriptive passage for case-based questions
    #[serde(
        rename = "caseText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub case_text: Option<String>,
    /// Shared context for paragraph/comprehension questions
    #[serde(
        rename = "paragraphText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub paragraph_text: Option<String>,
}

/// Named group of questions with optional instructions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub questions: Vec<Question>,
}

/// A generated exam paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub duration_seconds: u64,
    pub sections: Vec<Section>,
    #[serde(
        rename = "totalMaxMarks",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_max_marks: Option<u32>,
}

impl Exam {
    /// All questions across sections, in paper order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Total question count
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Check the structural invariants: at least one question, unique ids.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.question_count() == 0 {
            return Err("exam contains no questions".to_string());
        }
        let mut seen = HashSet::new();
        for q in self.questions() {
            if !seen.insert(q.id.as_str()) {
                return Err(format!("duplicate question id: {}", q.id));
            }
        }
        Ok(())
    }

    /// Check whether a question id belongs to this exam
    pub fn contains_question(&self, id: &str) -> bool {
        self.questions().any(|q| q.id == id)
    }
}

/// The respondent's submitted answers, keyed by question id.
/// An absent key means "unanswered".
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: HashMap<String, String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Rejects ids that are not part of the exam so the
    /// sheet never holds keys outside the current paper.
    pub fn record(&mut self, exam: &Exam, question_id: &str, value: String) -> bool {
        if !exam.contains_question(question_id) {
            return false;
        }
        self.answers.insert(question_id.to_string(), value);
        true
    }

    /// Get the recorded answer for a question, if any
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Number of answered questions
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Check if no answers are recorded
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Drop all recorded answers
    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

/// Computed result of an exam session
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub total_score: i32,
    pub max_score: i32,
    pub percentile: f64,
}

/// Score an exam against an answer sheet.
///
/// Answers compare trimmed and lowercased (full Unicode, so symbol-bearing
/// markers like Δ match) against the question's correct marker. Net score
/// is correct×4 − wrong×1. A zero-question exam scores as all zeros with
/// percentile 0.0.
pub fn score_exam(exam: &Exam, answers: &AnswerSheet) -> Score {
    let mut correct = 0usize;
    let mut wrong = 0usize;
    let mut skipped = 0usize;

    for q in exam.questions() {
        match answers.get(&q.id) {
            None => skipped += 1,
            Some(ans) => {
                if ans.trim().to_lowercase() == q.correct_option.trim().to_lowercase() {
                    correct += 1;
                } else {
                    wrong += 1;
                }
            }
        }
    }

    let total_score = correct as i32 * MARKS_CORRECT - wrong as i32 * PENALTY_WRONG;
    let max_score = exam.question_count() as i32 * MARKS_CORRECT;

    let percentile = if max_score == 0 {
        0.0
    } else {
        let percentage = f64::from(total_score) / f64::from(max_score) * 100.0;
        percentile_for(percentage)
    };

    Score {
        correct,
        wrong,
        skipped,
        total_score,
        max_score,
        percentile,
    }
}

/// Percentile display heuristic: 90 + percentage/10.1, capped at 99.99.
/// A negative percentage pins the value to 5.2 instead of the formula.
pub fn percentile_for(percentage: f64) -> f64 {
    if percentage < 0.0 {
        return 5.2;
    }
    let p = 90.0 + percentage / 10.1;
    p.min(99.99)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::Mcq,
            text: format!("Question {}", id),
            options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            correct_option: correct.to_string(),
            explanation: "because".to_string(),
            marks: None,
            case_text: None,
            paragraph_text: None,
        }
    }

    fn exam_with(questions: Vec<Question>) -> Exam {
        Exam {
            duration_seconds: 3600,
            sections: vec![Section {
                name: "Section A".to_string(),
                context: None,
                questions,
            }],
            total_max_marks: None,
        }
    }

    #[test]
    fn test_counts_sum_to_question_count() {
        let exam = exam_with(vec![mcq("q1", "A"), mcq("q2", "B"), mcq("q3", "C")]);
        let mut sheet = AnswerSheet::new();
        assert!(sheet.record(&exam, "q1", "A".to_string()));
        assert!(sheet.record(&exam, "q2", "D".to_string()));

        let score = score_exam(&exam, &sheet);
        assert_eq!(score.correct + score.wrong + score.skipped, 3);
        assert_eq!(score.correct, 1);
        assert_eq!(score.wrong, 1);
        assert_eq!(score.skipped, 1);
    }

    #[test]
    fn test_jee_marking_scenario() {
        // 25 questions: 20 correct, 3 wrong, 2 skipped => 77/100
        let questions: Vec<Question> =
            (0..25).map(|i| mcq(&format!("q{}", i), "A")).collect();
        let exam = exam_with(questions);

        let mut sheet = AnswerSheet::new();
        for i in 0..20 {
            sheet.record(&exam, &format!("q{}", i), "A".to_string());
        }
        for i in 20..23 {
            sheet.record(&exam, &format!("q{}", i), "B".to_string());
        }

        let score = score_exam(&exam, &sheet);
        assert_eq!(score.correct, 20);
        assert_eq!(score.wrong, 3);
        assert_eq!(score.skipped, 2);
        assert_eq!(score.total_score, 77);
        assert_eq!(score.max_score, 100);
    }

    #[test]
    fn test_answer_comparison_trims_and_ignores_case() {
        let exam = exam_with(vec![mcq("q1", " A ")]);
        let mut sheet = AnswerSheet::new();
        sheet.record(&exam, "q1", "a".to_string());
        assert_eq!(score_exam(&exam, &sheet).correct, 1);
    }

    #[test]
    fn test_answer_comparison_lowercases_beyond_ascii() {
        // Correct markers can carry math symbols like Δ
        let exam = exam_with(vec![mcq("q1", "ΔH > 0")]);
        let mut sheet = AnswerSheet::new();
        sheet.record(&exam, "q1", "δh > 0".to_string());
        assert_eq!(score_exam(&exam, &sheet).correct, 1);
    }

    #[test]
    fn test_sheet_rejects_unknown_id() {
        let exam = exam_with(vec![mcq("q1", "A")]);
        let mut sheet = AnswerSheet::new();
        assert!(!sheet.record(&exam, "nope", "A".to_string()));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_zero_question_exam() {
        let exam = exam_with(vec![]);
        let score = score_exam(&exam, &AnswerSheet::new());
        assert_eq!(score.correct, 0);
        assert_eq!(score.wrong, 0);
        assert_eq!(score.skipped, 0);
        assert_eq!(score.total_score, 0);
        assert_eq!(score.max_score, 0);
        assert_eq!(score.percentile, 0.0);
    }

    #[test]
    fn test_percentile_range_and_monotonicity() {
        assert_eq!(percentile_for(-5.0), 5.2);
        assert!((percentile_for(0.0) - 90.0).abs() < 1e-9);
        assert_eq!(percentile_for(101.0), 99.99);
        assert_eq!(percentile_for(200.0), 99.99);

        let mut last = 0.0;
        for pct in 0..=100 {
            let p = percentile_for(f64::from(pct));
            assert!(p >= last);
            assert!((5.2..=99.99).contains(&p));
            last = p;
        }
    }

    #[test]
    fn test_percentile_of_77_percent() {
        // 77/100 => 90 + 77/10.1
        let p = percentile_for(77.0);
        assert!((p - (90.0 + 77.0 / 10.1)).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let empty = exam_with(vec![]);
        assert!(empty.validate().is_err());

        let dup = exam_with(vec![mcq("q1", "A"), mcq("q1", "B")]);
        assert!(dup.validate().is_err());

        let ok = exam_with(vec![mcq("q1", "A"), mcq("q2", "B")]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_exam_wire_format() {
        let json = serde_json::json!({
            "duration_seconds": 5400,
            "totalMaxMarks": 80,
            "sections": [{
                "name": "Section A",
                "questions": [{
                    "id": "q1",
                    "type": "case_based",
                    "text": "What follows?",
                    "caseText": "A long passage.",
                    "correctOption": "B",
                    "explanation": "see passage",
                    "marks": 4
                }]
            }]
        });

        let exam: Exam = serde_json::from_value(json).unwrap();
        assert_eq!(exam.duration_seconds, 5400);
        assert_eq!(exam.total_max_marks, Some(80));
        let q = exam.questions().next().unwrap();
        assert_eq!(q.kind, QuestionKind::CaseBased);
        assert_eq!(q.case_text.as_deref(), Some("A long passage."));
    }
}
