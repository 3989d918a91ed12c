//! Record Schema
//!
//! Field-level constraints applied to every record before it reaches a store:
//! required fields, enumerated values and the frequency range. All violations of a
//! record are collected into one `SchemaError` so the caller sees the whole picture
//! in a single message.

use super::types::{InterviewRecord, Question};
use std::fmt;
use thiserror::Error;

pub const TOPICS: [&str; 32] = [
    "Arrays",
    "Strings",
    "LinkedList",
    "Stack",
    "Queue",
    "Hashing",
    "TwoPointers",
    "SlidingWindow",
    "BinarySearch",
    "Recursion",
    "Backtracking",
    "BitManipulation",
    "Greedy",
    "Sorting",
    "Heap",
    "Trie",
    "Graphs",
    "Trees",
    "BinaryTree",
    "BST",
    "SegmentTree",
    "DP",
    "DivideAndConquer",
    "Math",
    "Geometry",
    "NumberTheory",
    "Design",
    "LLD",
    "SystemDesign",
    "OOP",
    "Algorithms",
    "Behavioral",
];

pub const ROUND_TYPES: [&str; 4] = ["OA", "Technical", "Design", "HR"];

pub const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

pub const POSITIONS: [&str; 5] = ["Intern", "SDE1", "SDE2", "Senior", "Lead"];

pub const MIN_FREQUENCY: i64 = 1;
pub const MAX_FREQUENCY: i64 = 5;

/// A single failed constraint, addressed by its dotted path (`questions.0.topic`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Interview validation failed: {}", join_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<Violation>,
}

impl SchemaError {
    /// Returns true if any violation is reported for `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl InterviewRecord {
    /// Checks the record and every nested question against the schema.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut violations = Vec::new();

        require(&mut violations, "company", "company", &self.company);
        require(&mut violations, "role", "role", &self.role);
        require_one_of(&mut violations, "position", "position", &self.position, &POSITIONS);
        require(&mut violations, "experience", "experience", &self.experience);
        require(&mut violations, "year", "year", &self.year);

        for (idx, question) in self.questions.iter().enumerate() {
            question.collect_violations(&format!("questions.{}", idx), &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { violations })
        }
    }
}

impl Question {
    fn collect_violations(&self, prefix: &str, violations: &mut Vec<Violation>) {
        let path = |field: &str| format!("{}.{}", prefix, field);

        require(violations, &path("text"), "text", &self.text);
        require_one_of(violations, &path("topic"), "topic", &self.topic, &TOPICS);
        require_one_of(
            violations,
            &path("roundType"),
            "roundType",
            &self.round_type,
            &ROUND_TYPES,
        );
        require_one_of(
            violations,
            &path("difficulty"),
            "difficulty",
            &self.difficulty,
            &DIFFICULTIES,
        );

        if self.frequency < MIN_FREQUENCY {
            violations.push(Violation {
                path: path("frequency"),
                reason: format!(
                    "Path `frequency` ({}) is less than minimum allowed value ({}).",
                    self.frequency, MIN_FREQUENCY
                ),
            });
        } else if self.frequency > MAX_FREQUENCY {
            violations.push(Violation {
                path: path("frequency"),
                reason: format!(
                    "Path `frequency` ({}) is more than maximum allowed value ({}).",
                    self.frequency, MAX_FREQUENCY
                ),
            });
        }
    }
}

fn require(violations: &mut Vec<Violation>, path: &str, field: &str, value: &str) -> bool {
    if value.is_empty() {
        violations.push(Violation {
            path: path.to_string(),
            reason: format!("Path `{}` is required.", field),
        });
        return false;
    }
    true
}

fn require_one_of(
    violations: &mut Vec<Violation>,
    path: &str,
    field: &str,
    value: &str,
    allowed: &[&str],
) {
    if require(violations, path, field, value) && !allowed.contains(&value) {
        violations.push(Violation {
            path: path.to_string(),
            reason: format!("`{}` is not a valid enum value for path `{}`.", value, field),
        });
    }
}
