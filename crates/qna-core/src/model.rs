//! Question and Answer records

use serde::{Deserialize, Serialize};

/// A top-level record: question text plus its answers in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier, unique across the store
    pub id: String,

    /// Trimmed question text
    pub question: String,

    /// Answers, oldest first
    pub answers: Vec<Answer>,
}

impl Question {
    /// Create a question with no answers
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answers: Vec::new(),
        }
    }

    /// Append an answer, builder style
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.push(answer);
        self
    }

    /// Look up an answer by id
    pub fn answer(&self, id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    pub fn has_answer(&self, id: &str) -> bool {
        self.answer(id).is_some()
    }
}

/// Child record of a [`Question`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Identifier, unique within the parent question
    pub id: String,

    /// Trimmed answer text
    pub answer: String,
}

impl Answer {
    pub fn new(id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: answer.into(),
        }
    }
}

/// The record a fresh store is seeded with
pub fn seed_questions() -> Vec<Question> {
    vec![Question::new("1", "What is the meaning of life?")
        .with_answer(Answer::new(
            "1",
            "The pursuit of happiness and fulfillment in whatever way one chooses.",
        ))
        .with_answer(Answer::new(
            "2",
            "The meaning of life is to find inner peace and contentment through mindfulness and self-reflection.",
        ))]
}
