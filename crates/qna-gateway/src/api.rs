//! The procedure set as seen by a UI
//!
//! [`QuestionsApi`] is implemented both by the in-process [`Procedures`] and
//! by [`crate::client::RpcClient`], so views work the same against either.

use async_trait::async_trait;
use qna_core::{
    AddAnswerInput, AnswerAdded, AnswerDeleted, CreateQuestionInput, DeleteAnswerInput, Deleted,
    IdInput, Procedures, Question, UpdateQuestionInput,
};

use crate::Result;

#[async_trait]
pub trait QuestionsApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Question>>;

    async fn get_one(&self, input: IdInput) -> Result<Option<Question>>;

    async fn create(&self, input: CreateQuestionInput) -> Result<Question>;

    async fn update(&self, input: UpdateQuestionInput) -> Result<Question>;

    async fn delete(&self, input: IdInput) -> Result<Deleted>;

    async fn add_answer(&self, input: AddAnswerInput) -> Result<AnswerAdded>;

    async fn delete_answer(&self, input: DeleteAnswerInput) -> Result<AnswerDeleted>;
}

#[async_trait]
impl QuestionsApi for Procedures {
    async fn get_all(&self) -> Result<Vec<Question>> {
        Ok(Procedures::get_all(self))
    }

    async fn get_one(&self, input: IdInput) -> Result<Option<Question>> {
        Ok(Procedures::get_one(self, input)?)
    }

    async fn create(&self, input: CreateQuestionInput) -> Result<Question> {
        Ok(Procedures::create(self, input)?)
    }

    async fn update(&self, input: UpdateQuestionInput) -> Result<Question> {
        Ok(Procedures::update(self, input)?)
    }

    async fn delete(&self, input: IdInput) -> Result<Deleted> {
        Ok(Procedures::delete(self, input)?)
    }

    async fn add_answer(&self, input: AddAnswerInput) -> Result<AnswerAdded> {
        Ok(Procedures::add_answer(self, input)?)
    }

    async fn delete_answer(&self, input: DeleteAnswerInput) -> Result<AnswerDeleted> {
        Ok(Procedures::delete_answer(self, input)?)
    }
}
