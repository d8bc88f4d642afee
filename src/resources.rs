// src/resources.rs
// Static learning resources shared by prompts, quizzes and challenges

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    History,
    Languages,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::Science,
        Subject::History,
        Subject::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::History => "history",
            Subject::Languages => "languages",
        }
    }

    /// Practice tests and quizzes only exist for these
    pub fn supports_tests(&self) -> bool {
        matches!(self, Subject::Math | Subject::Science)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "math" => Ok(Subject::Math),
            "science" => Ok(Subject::Science),
            "history" => Ok(Subject::History),
            "languages" => Ok(Subject::Languages),
            _ => Err("Subject must be math, science, history, or languages".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err("Level must be beginner, intermediate, or advanced".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectInfo {
    pub levels: Vec<Level>,
    pub content: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnlineResource {
    pub name: &'static str,
    pub url: &'static str,
}

/// Everything the assistant may cite. Serialised verbatim into the context snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceCatalog {
    pub subjects: BTreeMap<Subject, SubjectInfo>,
    pub study_tips: BTreeMap<&'static str, &'static str>,
    pub online_resources: BTreeMap<&'static str, OnlineResource>,
    pub quiz_topics: BTreeMap<Subject, Vec<&'static str>>,
    pub badges: Vec<&'static str>,
    pub achievements: Vec<&'static str>,
    pub daily_challenges: Vec<&'static str>,
    pub weekly_challenges: Vec<&'static str>,
}

impl ResourceCatalog {
    pub fn builtin() -> Self {
        let all_levels = vec![Level::Beginner, Level::Intermediate, Level::Advanced];

        let subjects = BTreeMap::from([
            (
                Subject::Math,
                SubjectInfo {
                    levels: all_levels.clone(),
                    content: "Mathematics: Algebra, Calculus, Geometry",
                },
            ),
            (
                Subject::Science,
                SubjectInfo {
                    levels: all_levels.clone(),
                    content: "Science: Physics, Chemistry, Biology",
                },
            ),
            (
                Subject::History,
                SubjectInfo {
                    levels: all_levels.clone(),
                    content: "History: World History, Ancient Civilizations",
                },
            ),
            (
                Subject::Languages,
                SubjectInfo {
                    levels: all_levels,
                    content: "Languages: English, Hindi, Spanish",
                },
            ),
        ]);

        let study_tips = BTreeMap::from([
            (
                "concentration",
                "Use the Pomodoro technique: Study for 25 minutes, then take a 5-minute break.",
            ),
            (
                "note_taking",
                "Try the Cornell method: Divide your page into sections for notes, cues, and summaries.",
            ),
            (
                "exam_prep",
                "Practice past papers and review mistakes to improve understanding.",
            ),
        ]);

        let online_resources = BTreeMap::from([
            (
                "math",
                OnlineResource {
                    name: "Khan Academy",
                    url: "https://www.khanacademy.org/math",
                },
            ),
            (
                "science",
                OnlineResource {
                    name: "Coursera",
                    url: "https://www.coursera.org/browse/physical-science-and-engineering",
                },
            ),
            (
                "general",
                OnlineResource {
                    name: "Wikipedia",
                    url: "https://www.wikipedia.org/",
                },
            ),
        ]);

        let quiz_topics = BTreeMap::from([
            (
                Subject::Math,
                vec![
                    "What is the derivative of x^2?",
                    "Solve 2x + 3 = 7",
                    "What is 5!?",
                    "Solve x^2 - 4 = 0",
                    "What is Pythagoras theorem?",
                ],
            ),
            (
                Subject::Science,
                vec![
                    "What is Newton's first law?",
                    "What is the chemical symbol for water?",
                    "What is photosynthesis?",
                    "What is the boiling point of water?",
                    "What gas do plants absorb?",
                ],
            ),
        ]);

        Self {
            subjects,
            study_tips,
            online_resources,
            quiz_topics,
            badges: vec!["Beginner Badge", "Topic Master", "Mock Test Ace", "Subject Expert"],
            achievements: vec![
                "Completed first quiz",
                "Studied 5 days in a row",
                "Mastered a subject",
            ],
            daily_challenges: vec![
                "Solve 5 math problems",
                "Read a history chapter",
                "Practice 10 vocabulary words",
            ],
            weekly_challenges: vec![
                "Complete a mock test",
                "Watch 3 video lectures",
                "Write a summary",
            ],
        }
    }

    /// Quiz questions for a subject; empty for subjects without quizzes
    pub fn quiz_questions(&self, subject: Subject) -> &[&'static str] {
        self.quiz_topics
            .get(&subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub static RESOURCES: Lazy<ResourceCatalog> = Lazy::new(ResourceCatalog::builtin);
