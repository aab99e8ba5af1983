//! View-models for the list page and the single-question page

use qna_core::{
    AddAnswerInput, CreateQuestionInput, DeleteAnswerInput, FieldRule, IdInput, MutationOutput,
    Question, RuleSet,
};

use super::cache::SharedCache;
use crate::api::QuestionsApi;
use crate::GatewayError;

/// What the single-question page currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The route id failed validation
    InvalidId,
    Loading,
    /// The fetch failed; message shown verbatim
    Error(String),
    /// The id is valid but no such question exists
    NoData,
    Ready(Question),
}

/// A single form field with its last validation message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    /// Pre-check `raw` against `rule`, keeping the text and message for redisplay
    fn check(&mut self, rules: &RuleSet, name: &str, rule: FieldRule, raw: &str) -> Option<String> {
        self.value = raw.to_string();
        match rules.check(name, rule, raw) {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                self.error = e.message_for(name).map(str::to_string);
                None
            }
        }
    }

    fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }
}

/// First server-side issue reported against `field`
fn field_issue(error: &GatewayError, field: &str) -> Option<String> {
    error
        .issues()
        .iter()
        .find(|i| i.field == field)
        .map(|i| i.message.clone())
}

/// Single-question page: shows a question, adds and deletes answers
#[derive(Debug)]
pub struct QuestionPage<A> {
    api: A,
    cache: SharedCache,
    rules: RuleSet,
    id: Option<String>,
    state: ViewState,
    answer: FormField,
    mutation_error: Option<String>,
    redirect: Option<String>,
}

impl<A: QuestionsApi> QuestionPage<A> {
    pub fn new(api: A, rules: RuleSet, cache: SharedCache) -> Self {
        Self {
            api,
            cache,
            rules,
            id: None,
            state: ViewState::Loading,
            answer: FormField::default(),
            mutation_error: None,
            redirect: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Validated id of the question on screen
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn answer_field(&self) -> &FormField {
        &self.answer
    }

    /// Message from the last failed mutation
    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// Where the page wants to navigate next, after deleting its question
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Show question `raw_id`
    pub async fn load(&mut self, raw_id: &str) {
        match self.rules.check("id", FieldRule::Id, raw_id) {
            Ok(id) => {
                self.id = Some(id);
                self.state = ViewState::Loading;
                self.refresh().await;
            }
            Err(_) => {
                self.id = None;
                self.state = ViewState::InvalidId;
            }
        }
    }

    /// Serve from cache, fetching `getOne` on a miss
    pub async fn refresh(&mut self) {
        let Some(id) = self.id.clone() else {
            return;
        };

        let cached = self.cache.lock().one(&id).cloned();
        let question = match cached {
            Some(question) => question,
            None => match self.api.get_one(IdInput::new(id.clone())).await {
                Ok(question) => {
                    self.cache.lock().put_one(id, question.clone());
                    question
                }
                Err(e) => {
                    self.state = ViewState::Error(e.to_string());
                    return;
                }
            },
        };

        self.state = match question {
            Some(q) => ViewState::Ready(q),
            None => ViewState::NoData,
        };
    }

    /// Submit the "Add an answer" form; returns whether an answer was added
    pub async fn submit_answer(&mut self, raw: &str) -> bool {
        let Some(post_id) = self.id.clone() else {
            return false;
        };
        let Some(answer) = self
            .answer
            .check(&self.rules, "answer", FieldRule::AnswerText, raw)
        else {
            return false;
        };

        match self.api.add_answer(AddAnswerInput::new(post_id, answer)).await {
            Ok(out) => {
                self.answer.clear();
                self.on_success(&out).await;
                true
            }
            Err(e) => {
                self.answer.error = field_issue(&e, "answer");
                self.mutation_error = Some(e.to_string());
                false
            }
        }
    }

    pub async fn delete_answer(&mut self, answer_id: &str) -> bool {
        let Some(post_id) = self.id.clone() else {
            return false;
        };
        match self
            .api
            .delete_answer(DeleteAnswerInput::new(post_id, answer_id))
            .await
        {
            Ok(out) => {
                self.on_success(&out).await;
                true
            }
            Err(e) => {
                self.mutation_error = Some(e.to_string());
                false
            }
        }
    }

    /// Delete the question on screen and navigate back to the list
    pub async fn delete_question(&mut self) -> bool {
        let Some(id) = self.id.clone() else {
            return false;
        };
        match self.api.delete(IdInput::new(id)).await {
            Ok(out) => {
                self.on_success(&out).await;
                self.redirect = Some("/".to_string());
                true
            }
            Err(e) => {
                self.mutation_error = Some(e.to_string());
                false
            }
        }
    }

    async fn on_success(&mut self, out: &impl MutationOutput) {
        tracing::debug!(question_id = out.question_id(), "invalidating question views");
        self.mutation_error = None;
        self.cache.lock().invalidate_after(out);
        self.refresh().await;
    }
}

/// List page: all questions plus a "new question" form
#[derive(Debug)]
pub struct ListPage<A> {
    api: A,
    cache: SharedCache,
    rules: RuleSet,
    questions: Result<Vec<Question>, String>,
    question: FormField,
}

impl<A: QuestionsApi> ListPage<A> {
    pub fn new(api: A, rules: RuleSet, cache: SharedCache) -> Self {
        Self {
            api,
            cache,
            rules,
            questions: Ok(Vec::new()),
            question: FormField::default(),
        }
    }

    /// Listed questions, or the fetch error message
    pub fn questions(&self) -> Result<&[Question], &str> {
        match &self.questions {
            Ok(q) => Ok(q),
            Err(e) => Err(e),
        }
    }

    pub fn question_field(&self) -> &FormField {
        &self.question
    }

    /// Serve `getAll` from cache, fetching on a miss
    pub async fn refresh(&mut self) {
        let cached = self.cache.lock().all().cloned();
        self.questions = match cached {
            Some(all) => Ok(all),
            None => match self.api.get_all().await {
                Ok(all) => {
                    self.cache.lock().put_all(all.clone());
                    Ok(all)
                }
                Err(e) => Err(e.to_string()),
            },
        };
    }

    /// Submit the "Ask a question" form; returns the created question
    pub async fn submit_question(&mut self, raw: &str) -> Option<Question> {
        let text = self
            .question
            .check(&self.rules, "question", FieldRule::QuestionText, raw)?;

        match self.api.create(CreateQuestionInput::new(text)).await {
            Ok(created) => {
                self.question.clear();
                self.cache.lock().invalidate_after(&created);
                self.refresh().await;
                Some(created)
            }
            Err(e) => {
                self.question.error =
                    field_issue(&e, "question").or_else(|| Some(e.to_string()));
                None
            }
        }
    }
}
