//! Built-in syllabus catalog and per-subject completion tracking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Class grades covered by the catalog
pub const GRADES: [&str; 2] = ["11", "12"];

/// Subjects in catalog order
pub const SUBJECT_NAMES: [&str; 3] = ["Physics", "Chemistry", "Maths"];

const PHYSICS_11: &[&str] = &[
    "Physical World & Measurement",
    "Kinematics",
    "Laws of Motion",
    "Work, Energy & Power",
    "Rotational Motion",
    "Gravitation",
    "Properties of Solids",
    "Fluids",
    "Thermal Properties",
    "Thermodynamics",
    "Kinetic Theory",
    "Oscillations",
    "Waves",
];

const PHYSICS_12: &[&str] = &[
    "Electrostatics",
    "Current Electricity",
    "Magnetic Effects of Current",
    "Magnetism and Matter",
    "EMI and AC",
    "EM Waves",
    "Ray Optics",
    "Wave Optics",
    "Dual Nature of Radiation",
    "Atoms",
    "Nuclei",
    "Semiconductors",
];

const CHEMISTRY_11: &[&str] = &[
    "Some Basic Concepts",
    "Structure of Atom",
    "Periodicity",
    "Chemical Bonding",
    "States of Matter",
    "Thermodynamics",
    "Equilibrium",
    "Redox Reactions",
    "Hydrogen",
    "s-Block Elements",
    "p-Block Elements (11)",
    "Organic Chemistry: Basics",
    "Hydrocarbons",
    "Environmental Chemistry",
];

const CHEMISTRY_12: &[&str] = &[
    "Solid State",
    "Solutions",
    "Electrochemistry",
    "Chemical Kinetics",
    "Surface Chemistry",
    "p-Block Elements (12)",
    "d and f Block Elements",
    "Coordination Compounds",
    "Haloalkanes & Haloarenes",
    "Alcohols, Phenols & Ethers",
    "Aldehydes, Ketones & Acids",
    "Amines",
    "Biomolecules",
    "Polymers",
];

const MATHS_11: &[&str] = &[
    "Sets",
    "Relations & Functions",
    "Trigonometry",
    "PMI",
    "Complex Numbers",
    "Linear Inequalities",
    "Permutations & Combinations",
    "Binomial Theorem",
    "Sequences & Series",
    "Straight Lines",
    "Conic Sections",
    "3D Geometry (11)",
    "Limits & Derivatives",
    "Mathematical Reasoning",
    "Statistics",
    "Probability",
];

const MATHS_12: &[&str] = &[
    "Relations & Functions (12)",
    "ITF",
    "Matrices",
    "Determinants",
    "Continuity & Differentiability",
    "Applications of Derivatives",
    "Integrals",
    "Applications of Integrals",
    "Differential Equations",
    "Vector Algebra",
    "3D Geometry (12)",
    "Linear Programming",
    "Probability (12)",
];

/// Chapter list for a subject and grade. Unknown pairs get an empty slice.
pub fn chapters(subject: &str, grade: &str) -> &'static [&'static str] {
    match (subject, grade) {
        ("Physics", "11") => PHYSICS_11,
        ("Physics", "12") => PHYSICS_12,
        ("Chemistry", "11") => CHEMISTRY_11,
        ("Chemistry", "12") => CHEMISTRY_12,
        ("Maths", "11") => MATHS_11,
        ("Maths", "12") => MATHS_12,
        _ => &[],
    }
}

/// Total chapter count for a subject across both grades
pub fn chapter_count(subject: &str) -> usize {
    GRADES.iter().map(|g| chapters(subject, g).len()).sum()
}

/// Stable completion key for a chapter
pub fn chapter_key(subject: &str, grade: &str, chapter: &str) -> String {
    format!("{}-{}-{}", subject, grade, chapter)
}

/// Set of completed chapter keys, persisted between sessions.
/// BTreeSet keeps the serialized form deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyllabusProgress {
    completed: BTreeSet<String>,
}

impl SyllabusProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self, key: &str) -> bool {
        self.completed.contains(key)
    }

    /// Flip the completion state of a chapter key, returning the new state
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.completed.remove(key) {
            false
        } else {
            self.completed.insert(key.to_string());
            true
        }
    }

    /// Completed chapters belonging to a subject
    pub fn completed_in(&self, subject: &str) -> usize {
        let prefix = format!("{}-", subject);
        self.completed.iter().filter(|k| k.starts_with(&prefix)).count()
    }

    /// Whole-number completion percentage across both grades of a subject
    pub fn subject_progress(&self, subject: &str) -> u8 {
        let total = chapter_count(subject);
        if total == 0 {
            return 0;
        }
        let done = self.completed_in(subject);
        ((done as f64 / total as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        for subject in SUBJECT_NAMES {
            for grade in GRADES {
                assert!(
                    !chapters(subject, grade).is_empty(),
                    "missing chapters for {} {}",
                    subject,
                    grade
                );
            }
        }
        assert_eq!(chapter_count("Physics"), 25);
        assert!(chapters("Biology", "11").is_empty());
    }

    #[test]
    fn test_toggle_roundtrip() {
        let mut progress = SyllabusProgress::new();
        let key = chapter_key("Physics", "11", "Kinematics");
        assert!(!progress.is_complete(&key));
        assert!(progress.toggle(&key));
        assert!(progress.is_complete(&key));
        assert!(!progress.toggle(&key));
        assert!(!progress.is_complete(&key));
    }

    #[test]
    fn test_subject_progress_rounding() {
        let mut progress = SyllabusProgress::new();
        // 1 of 25 Physics chapters => 4%
        progress.toggle(&chapter_key("Physics", "11", "Kinematics"));
        assert_eq!(progress.subject_progress("Physics"), 4);
        // other subjects unaffected by the Physics prefix
        assert_eq!(progress.subject_progress("Chemistry"), 0);
    }

    #[test]
    fn test_progress_counts_only_matching_prefix() {
        let mut progress = SyllabusProgress::new();
        progress.toggle(&chapter_key("Maths", "12", "Matrices"));
        progress.toggle(&chapter_key("Maths", "11", "Sets"));
        assert_eq!(progress.completed_in("Maths"), 2);
        assert_eq!(progress.completed_in("Physics"), 0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let mut progress = SyllabusProgress::new();
        progress.toggle("Physics-11-Waves");
        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(json, r#"["Physics-11-Waves"]"#);
        let back: SyllabusProgress = serde_json::from_str(&json).unwrap();
        assert!(back.is_complete("Physics-11-Waves"));
    }
}
