//! The `questions.*` procedure set
//!
//! Each procedure validates its input against the active [`RuleSet`] before
//! touching the store, then performs exactly one store call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ProcedureError, Result};
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Answer, Question};
use crate::schema::{
    AddAnswerInput, CreateQuestionInput, DeleteAnswerInput, IdInput, Input, RuleSet,
    UpdateQuestionInput,
};
use crate::store::{InMemoryStore, QuestionStore};

/// Output of `questions.delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
}

/// Output of `questions.addAnswer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerAdded {
    pub new_answer: Answer,
    pub question_id: String,
}

/// Output of `questions.deleteAnswer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDeleted {
    pub id: String,
    pub question_id: String,
}

/// Result of a mutating procedure: names the question whose views are stale
pub trait MutationOutput {
    fn question_id(&self) -> &str;
}

impl MutationOutput for Question {
    fn question_id(&self) -> &str {
        &self.id
    }
}

impl MutationOutput for Deleted {
    fn question_id(&self) -> &str {
        &self.id
    }
}

impl MutationOutput for AnswerAdded {
    fn question_id(&self) -> &str {
        &self.question_id
    }
}

impl MutationOutput for AnswerDeleted {
    fn question_id(&self) -> &str {
        &self.question_id
    }
}

/// Procedure names, as addressed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    GetAll,
    GetOne,
    Create,
    Update,
    Delete,
    AddAnswer,
    DeleteAnswer,
}

impl Procedure {
    pub const ALL: [Procedure; 7] = [
        Procedure::GetAll,
        Procedure::GetOne,
        Procedure::Create,
        Procedure::Update,
        Procedure::Delete,
        Procedure::AddAnswer,
        Procedure::DeleteAnswer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Procedure::GetAll => "questions.getAll",
            Procedure::GetOne => "questions.getOne",
            Procedure::Create => "questions.create",
            Procedure::Update => "questions.update",
            Procedure::Delete => "questions.delete",
            Procedure::AddAnswer => "questions.addAnswer",
            Procedure::DeleteAnswer => "questions.deleteAnswer",
        }
    }

    /// Queries are side-effect free and may be served over GET
    pub fn is_query(self) -> bool {
        matches!(self, Procedure::GetAll | Procedure::GetOne)
    }
}

impl std::fmt::Display for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Procedure {
    type Err = ProcedureError;

    fn from_str(s: &str) -> Result<Self> {
        Procedure::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ProcedureError::UnknownProcedure(s.to_string()))
    }
}

/// Validated, atomic operations over a [`QuestionStore`]
#[derive(Debug, Clone)]
pub struct Procedures {
    store: Arc<dyn QuestionStore>,
    ids: Arc<dyn IdGenerator>,
    rules: RuleSet,
}

impl Default for Procedures {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}

impl Procedures {
    /// Procedures over `store` with UUID ids and strict rules
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidIds),
            rules: RuleSet::strict(),
        }
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn store(&self) -> &Arc<dyn QuestionStore> {
        &self.store
    }

    /// `questions.getAll`
    pub fn get_all(&self) -> Vec<Question> {
        let questions = self.store.list();
        tracing::debug!(count = questions.len(), "listed questions");
        questions
    }

    /// `questions.getOne`; an absent id is `None`, not an error
    pub fn get_one(&self, input: IdInput) -> Result<Option<Question>> {
        let input = input.validate(&self.rules)?;
        let question = self.store.get(&input.id);
        tracing::debug!(id = %input.id, found = question.is_some(), "fetched question");
        Ok(question)
    }

    /// `questions.create`
    pub fn create(&self, input: CreateQuestionInput) -> Result<Question> {
        let input = input.validate(&self.rules)?;
        let question = self.store.create(input.question, self.ids.as_ref());
        tracing::info!(id = %question.id, "question created");
        Ok(question)
    }

    /// `questions.update`
    pub fn update(&self, input: UpdateQuestionInput) -> Result<Question> {
        let input = input.validate(&self.rules)?;
        let question = self
            .store
            .update_text(&input.id, input.question)
            .inspect_err(|e| tracing::warn!(id = %input.id, "update failed: {e}"))?;
        tracing::info!(id = %question.id, "question updated");
        Ok(question)
    }

    /// `questions.delete`
    pub fn delete(&self, input: IdInput) -> Result<Deleted> {
        let input = input.validate(&self.rules)?;
        let removed = self
            .store
            .remove(&input.id)
            .inspect_err(|e| tracing::warn!(id = %input.id, "delete failed: {e}"))?;
        tracing::info!(id = %removed.id, answers = removed.answers.len(), "question deleted");
        Ok(Deleted { id: removed.id })
    }

    /// `questions.addAnswer`
    pub fn add_answer(&self, input: AddAnswerInput) -> Result<AnswerAdded> {
        let input = input.validate(&self.rules)?;
        let new_answer = self
            .store
            .add_answer(&input.post_id, input.answer, self.ids.as_ref())
            .inspect_err(|e| tracing::warn!(post_id = %input.post_id, "add answer failed: {e}"))?;
        tracing::info!(post_id = %input.post_id, id = %new_answer.id, "answer added");
        Ok(AnswerAdded {
            new_answer,
            question_id: input.post_id,
        })
    }

    /// `questions.deleteAnswer`; deleting the same answer twice fails the second time
    pub fn delete_answer(&self, input: DeleteAnswerInput) -> Result<AnswerDeleted> {
        let input = input.validate(&self.rules)?;
        let removed = self
            .store
            .remove_answer(&input.post_id, &input.id)
            .inspect_err(|e| {
                tracing::warn!(post_id = %input.post_id, id = %input.id, "delete answer failed: {e}")
            })?;
        tracing::info!(post_id = %input.post_id, id = %removed.id, "answer deleted");
        Ok(AnswerDeleted {
            id: removed.id,
            question_id: input.post_id,
        })
    }

    /// Dispatch an untyped call, as received from the RPC transport
    pub fn call(&self, procedure: Procedure, input: Value) -> Result<Value> {
        let output = match procedure {
            Procedure::GetAll => serde_json::to_value(self.get_all())?,
            Procedure::GetOne => serde_json::to_value(self.get_one(self.rules.parse(input)?)?)?,
            Procedure::Create => serde_json::to_value(self.create(self.rules.parse(input)?)?)?,
            Procedure::Update => serde_json::to_value(self.update(self.rules.parse(input)?)?)?,
            Procedure::Delete => serde_json::to_value(self.delete(self.rules.parse(input)?)?)?,
            Procedure::AddAnswer => {
                serde_json::to_value(self.add_answer(self.rules.parse(input)?)?)?
            }
            Procedure::DeleteAnswer => {
                serde_json::to_value(self.delete_answer(self.rules.parse(input)?)?)?
            }
        };
        Ok(output)
    }
}
