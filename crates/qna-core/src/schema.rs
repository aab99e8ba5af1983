//! Validation rules for procedure inputs
//!
//! The rule table here is the only place acceptance rules are defined. The
//! RPC boundary validates whole inputs through [`Input::validate`]; UI forms
//! pre-check single fields through [`RuleSet::check`]. Both paths end up in
//! [`FieldRule::apply`], so a form can never accept text the server rejects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Issue, ValidationError};

/// Minimum length, in characters, of question and answer text after trimming
pub const MIN_TEXT_LEN: usize = 10;

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_QUESTION_TOO_SHORT: &str = "Must be at least 10 characters long";
pub const MSG_QUESTION_MARK: &str = "Must end with a question mark";
pub const MSG_ANSWER_TOO_SHORT: &str = "String must contain at least 10 character(s)";

/// Which variant of the question rules is enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Question text must also end with `?`
    #[default]
    Strict,
    /// Length rule only
    Lenient,
}

/// Rule applied to one input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty opaque identifier
    Id,
    /// Question text
    QuestionText,
    /// Answer text
    AnswerText,
}

impl FieldRule {
    /// Check `raw` and return the normalized value, or every violated message
    pub fn apply(self, strictness: Strictness, raw: &str) -> Result<String, Vec<&'static str>> {
        match self {
            FieldRule::Id => {
                if raw.is_empty() {
                    Err(vec![MSG_REQUIRED])
                } else {
                    Ok(raw.to_string())
                }
            }
            FieldRule::QuestionText => {
                let text = raw.trim();
                let mut messages = Vec::new();
                if text.chars().count() < MIN_TEXT_LEN {
                    messages.push(MSG_QUESTION_TOO_SHORT);
                }
                if strictness == Strictness::Strict && !text.ends_with('?') {
                    messages.push(MSG_QUESTION_MARK);
                }
                if messages.is_empty() {
                    Ok(text.to_string())
                } else {
                    Err(messages)
                }
            }
            FieldRule::AnswerText => {
                let text = raw.trim();
                if text.chars().count() < MIN_TEXT_LEN {
                    Err(vec![MSG_ANSWER_TOO_SHORT])
                } else {
                    Ok(text.to_string())
                }
            }
        }
    }
}

/// The active rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSet {
    strictness: Strictness,
}

impl RuleSet {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn strict() -> Self {
        Self::new(Strictness::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(Strictness::Lenient)
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Check a single field, e.g. for form-level feedback
    pub fn check(&self, field: &str, rule: FieldRule, raw: &str) -> Result<String, ValidationError> {
        rule.apply(self.strictness, raw).map_err(|messages| {
            ValidationError::new(messages.into_iter().map(|m| Issue::new(field, m)).collect())
        })
    }

    /// Decode an untyped value into `T` and apply its rules
    pub fn parse<T: Input>(&self, value: Value) -> Result<T, ValidationError> {
        let input: T = serde_json::from_value(value)
            .map_err(|e| ValidationError::new(vec![Issue::new("input", e.to_string())]))?;
        input.validate(self)
    }
}

/// Accumulates issues across the fields of one input
#[derive(Debug)]
pub struct Checker<'a> {
    rules: &'a RuleSet,
    issues: Vec<Issue>,
}

impl<'a> Checker<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            issues: Vec::new(),
        }
    }

    /// Apply `rule` to `raw`, recording failures under `field`
    pub fn field(&mut self, field: &str, rule: FieldRule, raw: String) -> String {
        match rule.apply(self.rules.strictness, &raw) {
            Ok(value) => value,
            Err(messages) => {
                self.issues
                    .extend(messages.into_iter().map(|m| Issue::new(field, m)));
                raw
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.issues))
        }
    }
}

/// A procedure input with schema rules attached
pub trait Input: Sized + DeserializeOwned + Serialize {
    /// Apply the rules, returning the normalized input
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError>;
}

/// `{ id }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdInput {
    pub id: String,
}

impl IdInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Input for IdInput {
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        let mut check = Checker::new(rules);
        let id = check.field("id", FieldRule::Id, self.id);
        check.finish(Self { id })
    }
}

/// `{ question }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuestionInput {
    pub question: String,
}

impl CreateQuestionInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

impl Input for CreateQuestionInput {
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        let mut check = Checker::new(rules);
        let question = check.field("question", FieldRule::QuestionText, self.question);
        check.finish(Self { question })
    }
}

/// `{ id, question }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuestionInput {
    pub id: String,
    pub question: String,
}

impl UpdateQuestionInput {
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
        }
    }
}

impl Input for UpdateQuestionInput {
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        let mut check = Checker::new(rules);
        let id = check.field("id", FieldRule::Id, self.id);
        let question = check.field("question", FieldRule::QuestionText, self.question);
        check.finish(Self { id, question })
    }
}

/// `{ postId, answer }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAnswerInput {
    pub post_id: String,
    pub answer: String,
}

impl AddAnswerInput {
    pub fn new(post_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            answer: answer.into(),
        }
    }
}

impl Input for AddAnswerInput {
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        let mut check = Checker::new(rules);
        let post_id = check.field("postId", FieldRule::Id, self.post_id);
        let answer = check.field("answer", FieldRule::AnswerText, self.answer);
        check.finish(Self { post_id, answer })
    }
}

/// `{ postId, id }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnswerInput {
    pub post_id: String,
    pub id: String,
}

impl DeleteAnswerInput {
    pub fn new(post_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            id: id.into(),
        }
    }
}

impl Input for DeleteAnswerInput {
    fn validate(self, rules: &RuleSet) -> Result<Self, ValidationError> {
        let mut check = Checker::new(rules);
        let post_id = check.field("postId", FieldRule::Id, self.post_id);
        let id = check.field("id", FieldRule::Id, self.id);
        check.finish(Self { post_id, id })
    }
}
