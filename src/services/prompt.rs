//! Prompt builders for every generation request the panels issue.
//!
//! The builders produce plain text instructions. Symbol and formatting
//! directives are part of the prompts because the rendered output is
//! displayed verbatim.

use crate::domain::exam::Score;

/// Which mock paper pattern to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamKind {
    JeeMain,
    JeeAdvanced,
}

impl ExamKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::JeeMain => "JEE Main",
            Self::JeeAdvanced => "JEE Advanced",
        }
    }
}

/// School assessment pattern for the printable paper generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperKind {
    PeriodicTest,
    TermExam,
}

impl PaperKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PeriodicTest => "Periodic Test",
            Self::TermExam => "Term Exam",
        }
    }

    pub fn max_marks(&self) -> u32 {
        match self {
            Self::PeriodicTest => 40,
            Self::TermExam => 80,
        }
    }

    pub fn duration_label(&self) -> &'static str {
        match self {
            Self::PeriodicTest => "90 Minutes",
            Self::TermExam => "3 Hours",
        }
    }
}

/// Mock exam request for the selected topics
pub fn mock_exam(kind: ExamKind, subject: &str, topics: &[String]) -> String {
    let topics_str = topics.join(", ");
    match kind {
        ExamKind::JeeMain => format!(
            "Act as a senior NTA Paper Setter. Generate a PROFESSIONAL JEE Main \
             Mock Paper for {subject}. \
             Topics selected: {topics_str}. \
             Structure: EXACTLY 25 questions. \
             - 20 Single Correct MCQs. \
             - 5 Numerical Type Questions. \
             Difficulty: Standard JEE Main level. \
             IMPORTANT: Use actual math symbols: \u{0394} (delta), \u{03c1} (rho), \
             \u{03c6} (phi), \u{03b8} (theta), \u{00d7} (multiplication cross), \
             \u{00b1}, \u{03a3}, \u{03c0}, \u{221a}, \u{221e}, \u{03bb}. \
             DO NOT use LaTeX codes like \\delta. Use <sup> and <sub> tags for \
             exponents and subscripts. \
             Ensure deep research and realistic engineering problems."
        ),
        ExamKind::JeeAdvanced => format!(
            "Act as an IIT Professor and JEE Advanced Coordinator. Generate a \
             CHALLENGING JEE Advanced Mock Paper for {subject}. \
             Topics: {topics_str}. \
             Structure: Rigorous mix of 18-20 questions: \
             - MCQs (Multiple Correct or Single Correct). \
             - Numerical Value (Integer/Decimal). \
             - Paragraph/Comprehension Type (2-3 questions for one descriptive \
             paragraph context). \
             Include actual math symbols: \u{0394}, \u{03c1}, \u{03c6}, \u{03b8}, \
             \u{00d7} (multiplication cross), \u{00b1}, \u{03a3}, \u{03c0}, \
             \u{221a}, \u{221e}, \u{03bb}, \u{222b}, \u{2202}. \
             NO LaTeX. High precision scientific content. Use <sup> and <sub> tags."
        ),
    }
}

/// Post-exam strategy analysis of a computed score
pub fn performance_analysis(score: &Score) -> String {
    format!(
        "Deeply analyze this JEE performance: Correct: {}, Wrong: {}, \
         Score: {}/{}. \
         Provide 3 highly expert strategy tips using symbols like \u{0394}, \
         \u{03c1}, \u{03c6}, \u{03b8}, \u{00d7}.",
        score.correct, score.wrong, score.total_score, score.max_score
    )
}

/// Tutor chat turn. Research mode trades the tutor persona for a
/// researcher persona.
pub fn chat_turn(message: &str, research_mode: bool) -> String {
    if research_mode {
        format!(
            "Act as an expert researcher for JEE. Answer accurately with \
             latest info: {message}"
        )
    } else {
        format!(
            "Act as a senior JEE physics, chemistry, and maths tutor. Answer \
             this query: {message}. Keep it educational and concise. Use plain \
             text and simple HTML tags like <b> or <br>. No LaTeX."
        )
    }
}

/// Ten-card deck for one chapter
pub fn flashcards(grade: &str, subject: &str, chapter: &str) -> String {
    format!(
        "Generate 10 advanced flashcards for Class {grade} {subject} chapter \
         \"{chapter}\". \
         Focus on core concepts, tricky formulas, and key definitions for JEE \
         level. \
         IMPORTANT: Use actual mathematical symbols: \u{0394} (delta), \
         \u{03c1} (rho), \u{03c6} (phi), \u{03b8} (theta), \u{00d7} \
         (multiplication), \u{03a3} (sigma), \u{03c0} (pi). \
         DO NOT use LaTeX formatting or words like 'rho' or 'delta'. \
         Fractions should be written as (a/b). Exponents should use a^b \
         notation or <sup> tags."
    )
}

/// Tabular formula reference for one chapter
pub fn formula_sheet(grade: &str, subject: &str, chapter: &str) -> String {
    format!(
        "Generate a concise, tabular formula sheet for Class {grade} {subject} \
         chapter \"{chapter}\". \
         Include columns for Formula, Variables, and Key Conditions. \
         IMPORTANT: Use actual mathematical symbols: \u{0394} (delta), \
         \u{03c1} (rho), \u{03c6} (phi), \u{03b8} (theta), \u{00d7} \
         (multiplication), \u{03a3} (sigma), \u{03c0} (pi), \u{00b1} \
         (plus-minus), \u{221a} (square root), \u{221e} (infinity). \
         DO NOT use LaTeX codes like \\delta or letters like 'delta' or 'rho'. \
         Use <sup> for exponents and <sub> for subscripts. \
         Use <table>, <tr>, <th>, <td> tags for layout. Style tables with \
         border-collapse and padding."
    )
}

/// Examiner-style evaluation of a written answer, out of 5 marks
pub fn grade_answer(question: &str, answer: &str) -> String {
    format!(
        "Act as a strict CBSE / JEE examiner. Question: \"{question}\" Student \
         Answer: \"{answer}\". \
         Evaluate out of 5 marks. Provide detailed feedback, point out missing \
         points, and provide a model answer. Use plain text / simple HTML. \
         NO LATEX."
    )
}

/// Memory aid for a named topic
pub fn mnemonic(topic: &str) -> String {
    format!(
        "Create a creative, easy-to-remember mnemonic for the topic: \
         \"{topic}\". \
         Format with **Mnemonic Phrase** and **Explanation of each word**. \
         NO LATEX."
    )
}

/// Split one study task into actionable sub-tasks
pub fn task_breakdown(task_text: &str) -> String {
    format!(
        "Break down this study task into 3 actionable sub-tasks for a student: \
         \"{task_text}\". Return only the tasks as a simple list. No symbols \
         or formatting."
    )
}

/// Day schedule over the pending task texts
pub fn day_schedule(pending_tasks: &[String]) -> String {
    let active = pending_tasks.join(", ");
    format!(
        "Create a high-performance 6-hour study timeline (09:00 to 15:00) \
         using Pomodoro technique for: {active}. \
         Format as clean HTML. Use <b> for times, <div> for blocks, and <li> \
         for tasks. Focus on deep work and rest. No CSS or Style tags."
    )
}

/// Formal school question paper, sectioned A through E
pub fn school_paper(grade: &str, subject: &str, chapter: &str, kind: PaperKind) -> String {
    format!(
        "Act as a senior Kendriya Vidyalaya (KV) PGT Faculty. Generate a \
         formal Class {grade} {subject} question paper for the chapter: \
         \"{chapter}\". \
         Assessment Type: {} (Max Marks: {}). \
         Time Allowed: {}. \
         Structure: \
         - Section A: MCQs (1 mark each). \
         - Section B: Short Answer Type I (2 marks each). \
         - Section C: Short Answer Type II (3 marks each). \
         - Section D: Case Based Questions (CBQ) (4 marks each - include a \
         formal Case passage). \
         - Section E: Long Answer Type (5 marks each). \
         IMPORTANT: Provide the content as a formal school paper. Use actual \
         mathematical symbols: \u{0394}, \u{03c1}, \u{03c6}, \u{03b8}, \
         \u{00d7}, \u{00b1}, \u{03a3}, \u{03c0}, \u{221a}, \u{221e}, \u{03bb}. \
         Use <sup> and <sub> tags. DO NOT use LaTeX codes.",
        kind.display_name(),
        kind.max_marks(),
        kind.duration_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_exam_embeds_subject_and_topics() {
        let topics = vec!["Kinematics".to_string(), "Waves".to_string()];
        let main = mock_exam(ExamKind::JeeMain, "Physics", &topics);
        assert!(main.contains("JEE Main Mock Paper for Physics"));
        assert!(main.contains("Kinematics, Waves"));
        assert!(main.contains("EXACTLY 25 questions"));

        let advanced = mock_exam(ExamKind::JeeAdvanced, "Maths", &topics);
        assert!(advanced.contains("JEE Advanced Mock Paper for Maths"));
        assert!(advanced.contains("18-20 questions"));
    }

    #[test]
    fn test_chat_turn_switches_persona() {
        let tutor = chat_turn("what is torque", false);
        assert!(tutor.contains("senior JEE physics, chemistry, and maths tutor"));
        let research = chat_turn("what is torque", true);
        assert!(research.contains("expert researcher"));
    }

    #[test]
    fn test_paper_kind_parameters() {
        assert_eq!(PaperKind::PeriodicTest.max_marks(), 40);
        assert_eq!(PaperKind::PeriodicTest.duration_label(), "90 Minutes");
        assert_eq!(PaperKind::TermExam.max_marks(), 80);
        assert_eq!(PaperKind::TermExam.duration_label(), "3 Hours");

        let p = school_paper("12", "Physics", "Electrostatics", PaperKind::PeriodicTest);
        assert!(p.contains("Periodic Test (Max Marks: 40)"));
        assert!(p.contains("Time Allowed: 90 Minutes"));
    }

    #[test]
    fn test_analysis_includes_score_line() {
        let score = Score {
            correct: 20,
            wrong: 3,
            skipped: 2,
            total_score: 77,
            max_score: 100,
            percentile: 97.62,
        };
        let p = performance_analysis(&score);
        assert!(p.contains("Correct: 20, Wrong: 3, Score: 77/100"));
    }

    #[test]
    fn test_schedule_joins_pending_tasks() {
        let p = day_schedule(&["Revise optics".to_string(), "Mock test".to_string()]);
        assert!(p.contains("for: Revise optics, Mock test."));
    }
}
