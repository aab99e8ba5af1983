//! UI tests: page routes and the refetch-after-mutation discipline

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use qna_core::{
    AddAnswerInput, AnswerAdded, AnswerDeleted, CreateQuestionInput, DeleteAnswerInput, Deleted,
    IdInput, IdStrategy, InMemoryStore, Procedures, Question, RuleSet, SequentialIds,
    UpdateQuestionInput,
};
use qna_gateway::ui::{ListPage, QueryCache, QuestionPage, ViewState};
use qna_gateway::{Gateway, GatewayConfig, QuestionsApi, Result};
use tower::ServiceExt;

/// Procedures wrapper that counts query round-trips
#[derive(Debug, Clone)]
struct CountingApi {
    inner: Procedures,
    get_all: Arc<AtomicUsize>,
    get_one: Arc<AtomicUsize>,
}

impl CountingApi {
    fn new() -> Self {
        Self {
            inner: Procedures::new(Arc::new(InMemoryStore::seeded()))
                .with_ids(Arc::new(SequentialIds::starting_at(10))),
            get_all: Arc::new(AtomicUsize::new(0)),
            get_one: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_one_calls(&self) -> usize {
        self.get_one.load(Ordering::SeqCst)
    }

    fn get_all_calls(&self) -> usize {
        self.get_all.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionsApi for CountingApi {
    async fn get_all(&self) -> Result<Vec<Question>> {
        self.get_all.fetch_add(1, Ordering::SeqCst);
        QuestionsApi::get_all(&self.inner).await
    }

    async fn get_one(&self, input: IdInput) -> Result<Option<Question>> {
        self.get_one.fetch_add(1, Ordering::SeqCst);
        QuestionsApi::get_one(&self.inner, input).await
    }

    async fn create(&self, input: CreateQuestionInput) -> Result<Question> {
        QuestionsApi::create(&self.inner, input).await
    }

    async fn update(&self, input: UpdateQuestionInput) -> Result<Question> {
        QuestionsApi::update(&self.inner, input).await
    }

    async fn delete(&self, input: IdInput) -> Result<Deleted> {
        QuestionsApi::delete(&self.inner, input).await
    }

    async fn add_answer(&self, input: AddAnswerInput) -> Result<AnswerAdded> {
        QuestionsApi::add_answer(&self.inner, input).await
    }

    async fn delete_answer(&self, input: DeleteAnswerInput) -> Result<AnswerDeleted> {
        QuestionsApi::delete_answer(&self.inner, input).await
    }
}

fn answer_ids(page: &QuestionPage<CountingApi>) -> Vec<String> {
    match page.state() {
        ViewState::Ready(q) => q.answers.iter().map(|a| a.id.clone()).collect(),
        other => panic!("page not ready: {other:?}"),
    }
}

#[tokio::test]
async fn test_cached_until_mutation() {
    let api = CountingApi::new();
    let mut page = QuestionPage::new(api.clone(), RuleSet::strict(), QueryCache::shared());

    page.load("1").await;
    page.refresh().await;
    assert_eq!(api.get_one_calls(), 1);

    assert!(page.submit_answer("Forty-two, as everyone knows.").await);
    assert_eq!(api.get_one_calls(), 2);
    assert_eq!(answer_ids(&page), vec!["1", "2", "10"]);
    assert!(page.answer_field().value.is_empty());
}

#[tokio::test]
async fn test_mutation_invalidates_list_view_too() {
    let api = CountingApi::new();
    let cache = QueryCache::shared();
    let mut list = ListPage::new(api.clone(), RuleSet::strict(), cache.clone());
    let mut page = QuestionPage::new(api.clone(), RuleSet::strict(), cache.clone());

    list.refresh().await;
    list.refresh().await;
    assert_eq!(api.get_all_calls(), 1);
    assert_eq!(list.questions().unwrap()[0].answers.len(), 2);

    page.load("1").await;
    assert!(page.delete_answer("2").await);

    list.refresh().await;
    assert_eq!(api.get_all_calls(), 2);
    assert_eq!(list.questions().unwrap()[0].answers.len(), 1);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let api = CountingApi::new();
    let mut page = QuestionPage::new(api.clone(), RuleSet::strict(), QueryCache::shared());
    page.load("1").await;

    assert!(!page.delete_answer("99").await);
    assert_eq!(page.mutation_error(), Some("Answer not found"));
    assert_eq!(api.get_one_calls(), 1);
    assert_eq!(answer_ids(&page), vec!["1", "2"]);
}

#[tokio::test]
async fn test_delete_question_navigates_home() {
    let api = CountingApi::new();
    let mut page = QuestionPage::new(api.clone(), RuleSet::strict(), QueryCache::shared());
    page.load("1").await;

    assert!(page.delete_question().await);
    assert_eq!(page.redirect(), Some("/"));
    assert_eq!(page.state(), &ViewState::NoData);
}

fn ui_router() -> Router {
    Gateway::new(GatewayConfig::default().with_ids(IdStrategy::Sequential)).build_router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_question_page_renders_answers() {
    let router = ui_router();
    let (status, _, html) = send(&router, get("/q/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("What is the meaning of life?"));
    assert!(html.contains("The pursuit of happiness"));
    assert!(html.contains("action=\"/q/1/answers/2/delete\""));
    assert!(html.contains("Add an answer"));
}

#[tokio::test]
async fn test_unknown_question_page() {
    let router = ui_router();
    let (status, _, html) = send(&router, get("/q/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No data"));
}

#[tokio::test]
async fn test_answer_form_round_trip() {
    let router = ui_router();

    let (status, _, html) = send(&router, form("/q/1/answers", "answer=short")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("String must contain at least 10 character(s)"));
    assert!(html.contains("value=\"short\""));

    let (status, location, _) = send(
        &router,
        form("/q/1/answers", "answer=Forty-two%2C+of+course+%3Cb%3E"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/q/1"));

    let (_, _, html) = send(&router, get("/q/1")).await;
    assert!(html.contains("Forty-two, of course &lt;b&gt;"));
}

#[tokio::test]
async fn test_delete_routes_redirect() {
    let router = ui_router();

    let (status, location, _) = send(&router, form("/q/1/answers/1/delete", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/q/1"));

    let (status, _, html) = send(&router, form("/q/1/answers/1/delete", "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Answer not found"));

    let (status, location, _) = send(&router, form("/q/1/delete", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (_, _, html) = send(&router, get("/")).await;
    assert!(html.contains("No questions yet"));
}

#[tokio::test]
async fn test_list_page_create() {
    let router = ui_router();

    let (status, _, html) = send(&router, form("/", "question=Not+a+question")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Must end with a question mark"));

    let (status, location, _) = send(&router, form("/", "question=Is+this+long+enough%3F")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (_, _, html) = send(&router, get("/")).await;
    assert!(html.contains("Is this long enough?"));
    assert!(html.contains("href=\"/q/2\""));
}
