// src/tutor/grading.rs
// How a quiz answer is judged from the model's reply

use std::str::FromStr;

pub const VERDICT_CORRECT: &str = "VERDICT: CORRECT";
pub const VERDICT_INCORRECT: &str = "VERDICT: INCORRECT";

const VERDICT_INSTRUCTION: &str = "QUIZ GRADING: The student is answering the pending quiz question. \
Judge the answer, explain briefly, then end your reply with a final line that is exactly \
\"VERDICT: CORRECT\" or \"VERDICT: INCORRECT\" (always in English).";

const KEYWORD_INSTRUCTION: &str = "QUIZ GRADING: The student is answering the pending quiz question. \
Tell them whether the answer is correct and explain briefly.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GradingStrategy {
    /// Model is asked for a trailing verdict line; only that line counts
    #[default]
    Verdict,
    /// Case-insensitive substring match on the reply
    Keyword(String),
    /// Quiz answers are never graded
    Disabled,
}

impl GradingStrategy {
    /// Extra rule appended to the system prompt while a quiz is open
    pub fn instruction(&self) -> Option<&'static str> {
        match self {
            GradingStrategy::Verdict => Some(VERDICT_INSTRUCTION),
            GradingStrategy::Keyword(_) => Some(KEYWORD_INSTRUCTION),
            GradingStrategy::Disabled => None,
        }
    }

    pub fn is_correct(&self, reply: &str) -> bool {
        match self {
            GradingStrategy::Verdict => reply
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(|line| {
                    line.trim_matches(|c: char| c == '*' || c == '`' || c == '.')
                        .eq_ignore_ascii_case(VERDICT_CORRECT)
                })
                .unwrap_or(false),
            GradingStrategy::Keyword(marker) => {
                !marker.is_empty() && reply.to_lowercase().contains(&marker.to_lowercase())
            }
            GradingStrategy::Disabled => false,
        }
    }
}

impl FromStr for GradingStrategy {
    type Err = String;

    /// `verdict`, `off`, or `keyword:<marker>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "verdict" => return Ok(GradingStrategy::Verdict),
            "off" | "disabled" | "none" => return Ok(GradingStrategy::Disabled),
            _ => {}
        }
        match s.split_once(':') {
            Some((kind, marker)) if kind.eq_ignore_ascii_case("keyword") && !marker.trim().is_empty() => {
                Ok(GradingStrategy::Keyword(marker.trim().to_string()))
            }
            _ => Err(format!("unknown grading strategy '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_reads_last_line_only() {
        let grader = GradingStrategy::Verdict;
        assert!(grader.is_correct("Nice work, x = 2.\nVERDICT: CORRECT"));
        assert!(grader.is_correct("Sahi jawab!\n**Verdict: Correct**\n\n"));
        assert!(!grader.is_correct("That is not correct.\nVERDICT: INCORRECT"));
        assert!(!grader.is_correct("VERDICT: CORRECT\nActually wait, no."));
        assert!(!grader.is_correct(""));
    }

    #[test]
    fn test_keyword_is_plain_substring() {
        let grader = GradingStrategy::Keyword("correct".to_string());
        assert!(grader.is_correct("That's Correct!"));
        // the fragility this strategy is known for
        assert!(grader.is_correct("That is incorrect."));
        assert!(!grader.is_correct("Bilkul sahi!"));
    }

    #[test]
    fn test_disabled_never_grades() {
        let grader = GradingStrategy::Disabled;
        assert!(grader.instruction().is_none());
        assert!(!grader.is_correct("VERDICT: CORRECT"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("verdict".parse::<GradingStrategy>(), Ok(GradingStrategy::Verdict));
        assert_eq!("OFF".parse::<GradingStrategy>(), Ok(GradingStrategy::Disabled));
        assert_eq!(
            "keyword:well done".parse::<GradingStrategy>(),
            Ok(GradingStrategy::Keyword("well done".to_string()))
        );
        assert!("keyword:".parse::<GradingStrategy>().is_err());
        assert!("regex".parse::<GradingStrategy>().is_err());
    }
}
