//! Plain-text rendering and file export of formal question papers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::exam::{Exam, QuestionKind};
use crate::error::Result;
use crate::services::prompt::PaperKind;

/// Width the header rules and section banners are centered within
const PAPER_WIDTH: usize = 72;

/// Setup the paper was generated from, kept for the header
#[derive(Debug, Clone)]
pub struct PaperMeta {
    pub grade: String,
    pub subject: String,
    pub chapter: String,
    pub kind: PaperKind,
}

/// Marks default when a question carries none, by section position.
/// Sections run A through E with 1/2/3/4/5 marks each.
fn default_marks(section_index: usize) -> u32 {
    match section_index {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        _ => 5,
    }
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= PAPER_WIDTH {
        return text.to_string();
    }
    let pad = (PAPER_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn option_label(index: usize) -> char {
    (b'a' + (index as u8).min(25)) as char
}

/// Strip the simple markup tags prompts ask for, leaving readable text.
/// `<sup>`/`<sub>` content is kept inline, `<br>` becomes a newline.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }
        let name = tag
            .trim_start_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        if name == "br" || name == "div" && tag.starts_with('/') || name == "li" && !tag.starts_with('/') {
            out.push('\n');
        }
    }
    out
}

/// Render a generated paper as a printable text sheet
pub fn render_paper(exam: &Exam, meta: &PaperMeta) -> String {
    let mut out = String::new();
    let rule = "=".repeat(PAPER_WIDTH);
    let max_marks = meta
        .kind
        .max_marks()
        .max(exam.total_max_marks.unwrap_or(0));
    let time = match meta.kind {
        PaperKind::PeriodicTest => "1.5 HOURS",
        PaperKind::TermExam => "3 HOURS",
    };

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&centered("KENDRIYA VIDYALAYA SANGATHAN"));
    out.push('\n');
    out.push_str(&centered(&format!(
        "{} (2024-25)",
        meta.kind.display_name().to_uppercase()
    )));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "CLASS: {:<30} SUBJECT: {}\n",
        meta.grade,
        meta.subject.to_uppercase()
    ));
    out.push_str(&format!(
        "TIME: {:<31} MAX MARKS: {}\n",
        time, max_marks
    ));
    out.push_str(&format!("CHAPTER: {}\n", meta.chapter));
    out.push_str(&rule);
    out.push_str("\n\n");

    out.push_str("General Instructions:\n");
    for line in [
        "All questions are compulsory. Internal choices may be provided within questions.",
        "Section A contains Multiple Choice Questions of 1 mark each.",
        "Section B contains Short Answer Type I questions of 2 marks each.",
        "Section C contains Short Answer Type II questions of 3 marks each.",
        "Section D contains Case Based Questions of 4 marks each.",
        "Section E contains Long Answer Type questions of 5 marks each.",
    ] {
        out.push_str(&format!("  * {}\n", line));
    }
    out.push('\n');

    for (si, section) in exam.sections.iter().enumerate() {
        out.push_str(&centered(&format!(
            "------ {} ------",
            section.name.to_uppercase()
        )));
        out.push('\n');
        if let Some(context) = &section.context {
            out.push_str(&strip_markup(context));
            out.push('\n');
        }
        out.push('\n');

        for (qi, q) in section.questions.iter().enumerate() {
            let marks = q.marks.unwrap_or_else(|| default_marks(si));
            if let Some(case) = &q.case_text {
                out.push_str(&format!("    [Case] {}\n\n", strip_markup(case)));
            }
            if let Some(para) = &q.paragraph_text {
                out.push_str(&format!("    [Passage] {}\n\n", strip_markup(para)));
            }
            out.push_str(&format!(
                "{:>2}. {}  [{}]\n",
                qi + 1,
                strip_markup(&q.text),
                marks
            ));
            if q.kind == QuestionKind::Mcq {
                for (oi, opt) in q.options.iter().enumerate() {
                    out.push_str(&format!(
                        "      ({}) {}\n",
                        option_label(oi),
                        strip_markup(opt)
                    ));
                }
            }
            out.push('\n');
        }
    }

    out.push_str(&centered("--- END OF QUESTION PAPER ---"));
    out.push('\n');
    out
}

/// Write a rendered paper next to the state files and return its path
pub fn export_paper(dir: &Path, meta: &PaperMeta, rendered: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let slug: String = format!(
        "{}-class{}-{}",
        meta.subject.to_lowercase(),
        meta.grade,
        meta.chapter.to_lowercase()
    )
    .chars()
    .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
    .collect();
    let path = dir.join(format!("paper-{}.txt", slug));
    fs::write(&path, rendered)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exam::{Question, Section};
    use tempfile::TempDir;

    fn sample_exam() -> Exam {
        Exam {
            duration_seconds: 5400,
            total_max_marks: Some(40),
            sections: vec![
                Section {
                    name: "Section A".to_string(),
                    context: None,
                    questions: vec![Question {
                        id: "q1".to_string(),
                        kind: QuestionKind::Mcq,
                        text: "Unit of charge?".to_string(),
                        options: vec!["Coulomb".into(), "Volt".into(), "Ohm".into(), "Watt".into()],
                        correct_option: "Coulomb".to_string(),
                        explanation: "SI unit".to_string(),
                        marks: None,
                        case_text: None,
                        paragraph_text: None,
                    }],
                },
                Section {
                    name: "Section D".to_string(),
                    context: None,
                    questions: vec![Question {
                        id: "q2".to_string(),
                        kind: QuestionKind::CaseBased,
                        text: "What force acts on the dipole?".to_string(),
                        options: vec![],
                        correct_option: "Net zero force".to_string(),
                        explanation: "uniform field".to_string(),
                        marks: Some(4),
                        case_text: Some("A dipole sits in a uniform field E.".to_string()),
                        paragraph_text: None,
                    }],
                },
            ],
        }
    }

    fn meta() -> PaperMeta {
        PaperMeta {
            grade: "12".to_string(),
            subject: "Physics".to_string(),
            chapter: "Electrostatics".to_string(),
            kind: PaperKind::PeriodicTest,
        }
    }

    #[test]
    fn test_paper_layout() {
        let rendered = render_paper(&sample_exam(), &meta());
        assert!(rendered.contains("KENDRIYA VIDYALAYA SANGATHAN"));
        assert!(rendered.contains("PERIODIC TEST (2024-25)"));
        assert!(rendered.contains("SUBJECT: PHYSICS"));
        assert!(rendered.contains("MAX MARKS: 40"));
        assert!(rendered.contains("General Instructions:"));
        assert!(rendered.contains("------ SECTION A ------"));
        assert!(rendered.contains("(a) Coulomb"));
        assert!(rendered.contains("[Case] A dipole sits in a uniform field E."));
        assert!(rendered.trim_end().ends_with("--- END OF QUESTION PAPER ---"));
    }

    #[test]
    fn test_marks_default_by_section() {
        let rendered = render_paper(&sample_exam(), &meta());
        // Section A question carries no marks field, defaults to 1
        assert!(rendered.contains("Unit of charge?  [1]"));
        // explicit marks win
        assert!(rendered.contains("What force acts on the dipole?  [4]"));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("a<sup>2</sup> + b<sub>0</sub>"), "a2 + b0");
        assert_eq!(strip_markup("line<br>break"), "line\nbreak");
        assert_eq!(strip_markup("<b>bold</b> text"), "bold text");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let rendered = render_paper(&sample_exam(), &meta());
        let path = export_paper(dir.path(), &meta(), &rendered).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("paper-physics"));
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, rendered);
    }
}
