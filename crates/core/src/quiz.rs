//! Quiz data model, client-side schema validation, and the page-turn
//! session machine. The generative service itself is an external
//! collaborator behind `QuizSource`; a malformed response discards the
//! whole quiz, never a partial one.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub book_title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizError {
    /// The response was not valid JSON for the expected shape.
    Parse(String),
    /// The JSON parsed but violated the schema contract.
    Invalid(&'static str),
    /// The collaborator could not produce a quiz at all.
    Unavailable(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "quiz response did not parse: {message}"),
            Self::Invalid(reason) => write!(f, "quiz response rejected: {reason}"),
            Self::Unavailable(message) => write!(f, "quiz source unavailable: {message}"),
        }
    }
}

impl std::error::Error for QuizError {}

impl Quiz {
    /// Parse and validate a raw collaborator response.
    pub fn from_json(text: &str) -> Result<Self, QuizError> {
        let quiz: Self =
            serde_json::from_str(text).map_err(|err| QuizError::Parse(err.to_string()))?;
        quiz.validate()?;
        Ok(quiz)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::Invalid("a quiz needs at least one question"));
        }
        for question in &self.questions {
            if question.options.len() != QUIZ_OPTION_COUNT {
                return Err(QuizError::Invalid("every question needs exactly four options"));
            }
            if !question.options.contains(&question.correct_answer) {
                return Err(QuizError::Invalid("the correct answer must be among the options"));
            }
        }
        Ok(())
    }
}

/// The generative collaborator seam.
pub trait QuizSource {
    fn generate(&self, title: &str, author: &str, chapters: u32) -> Result<Quiz, QuizError>;
}

/// Deterministic offline source used by the app and tests.
pub struct CannedQuizSource;

impl QuizSource for CannedQuizSource {
    fn generate(&self, title: &str, author: &str, chapters: u32) -> Result<Quiz, QuizError> {
        let questions = vec![
            QuizQuestion {
                question: format!("Who wrote \"{title}\"?"),
                options: vec![
                    author.to_string(),
                    "An anonymous scribe".to_string(),
                    "The royal archivist".to_string(),
                    "Nobody remembers".to_string(),
                ],
                correct_answer: author.to_string(),
                explanation: format!("\"{title}\" is credited to {author}."),
            },
            QuizQuestion {
                question: format!("How many chapters does \"{title}\" have?"),
                options: vec![
                    chapters.to_string(),
                    (chapters + 1).to_string(),
                    (chapters + 7).to_string(),
                    chapters.saturating_sub(2).max(1).to_string(),
                ],
                correct_answer: chapters.to_string(),
                explanation: format!("The shelf copy runs to {chapters} chapters."),
            },
            QuizQuestion {
                question: "Where would this volume be reshelved?".to_string(),
                options: vec![
                    "The library hall".to_string(),
                    "The mountain border".to_string(),
                    "A grass chunk".to_string(),
                    "Under the rug".to_string(),
                ],
                correct_answer: "The library hall".to_string(),
                explanation: "Every catalogued book belongs to the hall's shelves.".to_string(),
            },
        ];
        let quiz = Quiz { book_title: title.to_string(), questions };
        quiz.validate()?;
        Ok(quiz)
    }
}

/// Pure state machine over a validated quiz: answer, lock, page forward,
/// finish with a score.
#[derive(Clone, Debug)]
pub struct QuizSession {
    quiz: Quiz,
    index: usize,
    score: u32,
    answered: Option<usize>,
    finished: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self { quiz, index: 0, score: 0, answered: None, finished: false }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.questions.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn answered(&self) -> Option<usize> {
        self.answered
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished { None } else { self.quiz.questions.get(self.index) }
    }

    /// Pick an option. Returns whether it was correct, or `None` when the
    /// question is already locked, the index is out of range, or the quiz
    /// is over.
    pub fn select(&mut self, option: usize) -> Option<bool> {
        if self.finished || self.answered.is_some() || option >= QUIZ_OPTION_COUNT {
            return None;
        }
        let question = self.quiz.questions.get(self.index)?;
        let correct = question.options[option] == question.correct_answer;
        self.answered = Some(option);
        if correct {
            self.score += 1;
        }
        Some(correct)
    }

    /// Turn the page; only legal once the current question is answered.
    pub fn advance(&mut self) {
        if self.finished || self.answered.is_none() {
            return;
        }
        if self.index + 1 < self.quiz.questions.len() {
            self.index += 1;
            self.answered = None;
        } else {
            self.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> Quiz {
        CannedQuizSource.generate("The Sunken Stacks", "Mira Quill", 9).expect("canned quiz")
    }

    #[test]
    fn canned_source_passes_its_own_validation() {
        let quiz = sample_quiz();
        assert_eq!(quiz.book_title, "The Sunken Stacks");
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn json_roundtrip_uses_the_wire_field_names() {
        let quiz = sample_quiz();
        let json = serde_json::to_string(&quiz).expect("serialize");
        assert!(json.contains("\"bookTitle\""));
        assert!(json.contains("\"correctAnswer\""));
        assert_eq!(Quiz::from_json(&json).expect("parse"), quiz);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Quiz::from_json("{ not json").expect_err("must fail");
        assert!(matches!(err, QuizError::Parse(_)));
    }

    #[test]
    fn wrong_option_count_discards_the_quiz() {
        let mut quiz = sample_quiz();
        quiz.questions[0].options.pop();
        assert!(matches!(quiz.validate(), Err(QuizError::Invalid(_))));
    }

    #[test]
    fn absent_correct_answer_discards_the_quiz() {
        let mut quiz = sample_quiz();
        quiz.questions[1].correct_answer = "not an option".to_string();
        assert!(matches!(quiz.validate(), Err(QuizError::Invalid(_))));
    }

    #[test]
    fn empty_question_list_discards_the_quiz() {
        let quiz = Quiz { book_title: "Empty".to_string(), questions: Vec::new() };
        assert!(matches!(quiz.validate(), Err(QuizError::Invalid(_))));
    }

    #[test]
    fn correct_answers_score_and_lock() {
        let quiz = sample_quiz();
        let correct_index = quiz.questions[0]
            .options
            .iter()
            .position(|option| *option == quiz.questions[0].correct_answer)
            .expect("correct option present");

        let mut session = QuizSession::new(quiz);
        assert_eq!(session.select(correct_index), Some(true));
        assert_eq!(session.score(), 1);

        // Locked: a second pick on the same page is ignored.
        assert_eq!(session.select(0), None);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advancing_before_answering_is_ignored() {
        let mut session = QuizSession::new(sample_quiz());
        session.advance();
        assert_eq!(session.index(), 0);
        assert!(!session.finished());
    }

    #[test]
    fn finishing_reports_the_final_score() {
        let quiz = sample_quiz();
        let total = quiz.questions.len();
        let mut session = QuizSession::new(quiz);

        for _ in 0..total {
            let question = session.current().expect("question").clone();
            let correct_index = question
                .options
                .iter()
                .position(|option| *option == question.correct_answer)
                .expect("correct option present");
            assert_eq!(session.select(correct_index), Some(true));
            session.advance();
        }

        assert!(session.finished());
        assert_eq!(session.current(), None);
        assert_eq!(session.score() as usize, total);
        assert_eq!(session.select(0), None, "a finished quiz takes no answers");
    }
}
