// src/progress.rs
// Gamification bookkeeping: XP awards, badges, levels and per-student attempts

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::debug;

use crate::resources::Subject;

/// Completion events that earn XP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    QuizCompleted,
    TestCompleted,
}

impl Action {
    pub fn xp(&self) -> u64 {
        match self {
            Action::QuizCompleted => 50,
            Action::TestCompleted => 100,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Action::QuizCompleted => "Beginner Badge",
            Action::TestCompleted => "Mock Test Ace",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::QuizCompleted => "quiz_completed",
            Action::TestCompleted => "test_completed",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz_completed" => Ok(Action::QuizCompleted),
            "test_completed" => Ok(Action::TestCompleted),
            _ => Err(()),
        }
    }
}

/// Level progression. Points accrue with XP; leveling up is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelState {
    pub level: u32,
    pub points: u64,
    pub threshold: u64,
}

impl LevelState {
    pub const INITIAL_THRESHOLD: u64 = 100;

    pub fn add_points(&mut self, points: u64) {
        self.points += points;
    }

    /// Spend `threshold` points for one level and double the next threshold.
    /// Returns false when there are not enough points.
    pub fn level_up(&mut self) -> bool {
        if self.points < self.threshold {
            return false;
        }
        self.level += 1;
        self.points -= self.threshold;
        self.threshold *= 2;
        true
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            level: 1,
            points: 0,
            threshold: Self::INITIAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectProgress {
    pub attempts: u32,
    pub weak_areas: String,
}

/// One student's record: `{xp, <subject>: {attempts, weak_areas}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub xp: u64,
    #[serde(flatten)]
    pub subjects: BTreeMap<Subject, SubjectProgress>,
}

/// Process-wide table keyed by caller-supplied student id. In-memory only.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    students: Mutex<HashMap<String, StudentRecord>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_xp(&self, student_id: &str, xp: u64) {
        let mut students = self.students.lock().await;
        let record = students.entry(student_id.to_string()).or_default();
        record.xp += xp;
        debug!("Student {} now at {} XP", student_id, record.xp);
    }

    /// Count an attempt. The weak area is a fixed placeholder, not inferred from answers.
    pub async fn record_attempt(&self, student_id: &str, subject: Subject) {
        let mut students = self.students.lock().await;
        let record = students.entry(student_id.to_string()).or_default();
        let progress = record.subjects.entry(subject).or_default();
        progress.attempts += 1;
        progress.weak_areas = format!("{subject} fundamentals");
    }

    pub async fn get(&self, student_id: &str) -> Option<StudentRecord> {
        self.students.lock().await.get(student_id).cloned()
    }

    /// JSON view of a student's record; `{}` for unknown ids
    pub async fn snapshot(&self, student_id: &str) -> Value {
        match self.get(student_id).await {
            Some(record) => {
                serde_json::to_value(record).unwrap_or_else(|_| Value::Object(Default::default()))
            }
            None => Value::Object(Default::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parse() {
        assert_eq!("quiz_completed".parse::<Action>(), Ok(Action::QuizCompleted));
        assert_eq!("test_completed".parse::<Action>(), Ok(Action::TestCompleted));
        assert!("homework_done".parse::<Action>().is_err());
        assert!("QUIZ_COMPLETED".parse::<Action>().is_err());
    }

    #[test]
    fn test_level_up_requires_threshold() {
        let mut level = LevelState::default();
        level.add_points(99);
        assert!(!level.level_up());
        assert_eq!(level.level, 1);
        assert_eq!(level.points, 99);
    }

    #[test]
    fn test_level_up_spends_points_and_doubles_threshold() {
        let mut level = LevelState::default();
        level.add_points(250);

        assert!(level.level_up());
        assert_eq!(level.level, 2);
        assert_eq!(level.points, 150);
        assert_eq!(level.threshold, 200);

        // 150 < 200
        assert!(!level.level_up());

        level.add_points(50);
        assert!(level.level_up());
        assert_eq!(level.level, 3);
        assert_eq!(level.points, 0);
        assert_eq!(level.threshold, 400);
    }

    #[tokio::test]
    async fn test_record_attempt_counts_and_sets_placeholder() {
        let tracker = ProgressTracker::new();
        tracker.record_attempt("s1", Subject::Math).await;
        tracker.record_attempt("s1", Subject::Math).await;
        tracker.record_attempt("s1", Subject::Science).await;

        let record = tracker.get("s1").await.unwrap();
        assert_eq!(record.subjects[&Subject::Math].attempts, 2);
        assert_eq!(record.subjects[&Subject::Math].weak_areas, "math fundamentals");
        assert_eq!(record.subjects[&Subject::Science].attempts, 1);
    }

    #[tokio::test]
    async fn test_snapshot_shape() {
        let tracker = ProgressTracker::new();
        tracker.add_xp("s1", 100).await;
        tracker.record_attempt("s1", Subject::Science).await;

        let snapshot = tracker.snapshot("s1").await;
        assert_eq!(snapshot["xp"], 100);
        assert_eq!(snapshot["science"]["attempts"], 1);
        assert_eq!(snapshot["science"]["weak_areas"], "science fundamentals");

        assert_eq!(tracker.snapshot("nobody").await, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_students_are_isolated() {
        let tracker = ProgressTracker::new();
        tracker.add_xp("a", 50).await;
        tracker.add_xp("b", 100).await;
        tracker.add_xp("a", 50).await;

        assert_eq!(tracker.get("a").await.unwrap().xp, 100);
        assert_eq!(tracker.get("b").await.unwrap().xp, 100);
    }
}
