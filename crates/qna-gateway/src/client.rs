//! HTTP client for a remote gateway's RPC endpoint

use async_trait::async_trait;
use qna_core::{
    AddAnswerInput, AnswerAdded, AnswerDeleted, CreateQuestionInput, DeleteAnswerInput, Deleted,
    IdInput, Procedure, Question, UpdateQuestionInput,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::QuestionsApi;
use crate::rpc::{RpcFailure, RpcSuccess};
use crate::Result;

/// Client for connecting to a QnA Gateway
#[derive(Debug, Clone)]
pub struct RpcClient {
    base_url: String,
    http: reqwest::Client,
}

impl RpcClient {
    /// `base_url` is the gateway root, e.g. `http://127.0.0.1:18790`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, procedure: Procedure) -> String {
        format!("{}/rpc/{}", self.base_url, procedure)
    }

    /// Send a query over GET
    pub async fn query<I, O>(&self, procedure: Procedure, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let input = serde_json::to_string(input)?;
        let response = self
            .http
            .get(self.url(procedure))
            .query(&[("input", input)])
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// Send a mutation over POST
    pub async fn mutate<I, O>(&self, procedure: Procedure, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(procedure))
            .json(input)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn read_envelope<O: DeserializeOwned>(response: reqwest::Response) -> Result<O> {
        let body: Value = response.json().await?;
        if body.get("error").is_some() {
            let failure: RpcFailure = serde_json::from_value(body)?;
            return Err(failure.into());
        }
        let success: RpcSuccess<O> = serde_json::from_value(body)?;
        Ok(success.result.data)
    }
}

#[async_trait]
impl QuestionsApi for RpcClient {
    async fn get_all(&self) -> Result<Vec<Question>> {
        self.query(Procedure::GetAll, &Value::Null).await
    }

    async fn get_one(&self, input: IdInput) -> Result<Option<Question>> {
        self.query(Procedure::GetOne, &input).await
    }

    async fn create(&self, input: CreateQuestionInput) -> Result<Question> {
        self.mutate(Procedure::Create, &input).await
    }

    async fn update(&self, input: UpdateQuestionInput) -> Result<Question> {
        self.mutate(Procedure::Update, &input).await
    }

    async fn delete(&self, input: IdInput) -> Result<Deleted> {
        self.mutate(Procedure::Delete, &input).await
    }

    async fn add_answer(&self, input: AddAnswerInput) -> Result<AnswerAdded> {
        self.mutate(Procedure::AddAnswer, &input).await
    }

    async fn delete_answer(&self, input: DeleteAnswerInput) -> Result<AnswerDeleted> {
        self.mutate(Procedure::DeleteAnswer, &input).await
    }
}
