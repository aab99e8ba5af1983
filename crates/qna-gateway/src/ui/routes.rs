//! Server-rendered UI routes
//!
//! Each request builds its view-model over the in-process procedures. A
//! successful form post redirects back to a GET, so the browser always
//! refetches after a mutation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use qna_core::Procedures;
use serde::Deserialize;
use std::sync::Arc;

use super::cache::QueryCache;
use super::page::{ListPage, QuestionPage, ViewState};
use super::render;
use crate::gateway::GatewayState;

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionForm {
    #[serde(default)]
    question: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerForm {
    #[serde(default)]
    answer: String,
}

fn question_page(state: &GatewayState) -> QuestionPage<Procedures> {
    QuestionPage::new(
        state.procedures.clone(),
        *state.procedures.rules(),
        QueryCache::shared(),
    )
}

fn list_page(state: &GatewayState) -> ListPage<Procedures> {
    ListPage::new(
        state.procedures.clone(),
        *state.procedures.rules(),
        QueryCache::shared(),
    )
}

/// Back to the page of the validated question id
fn redirect_to_question(page: &QuestionPage<Procedures>) -> Response {
    let Some(id) = page.id() else {
        return Redirect::to("/").into_response();
    };
    match render::question_path(id, &[]) {
        Ok(path) => Redirect::to(&path).into_response(),
        Err(e) => e.into_response(),
    }
}

fn render_question(page: &QuestionPage<Procedures>, status: StatusCode) -> Response {
    let status = match page.state() {
        ViewState::NoData => StatusCode::NOT_FOUND,
        ViewState::InvalidId => StatusCode::BAD_REQUEST,
        _ => status,
    };
    match render::question_page(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub(crate) async fn handle_list(State(state): State<Arc<GatewayState>>) -> Response {
    let mut page = list_page(&state);
    page.refresh().await;
    render::list_page(&page).map(Html).into_response()
}

pub(crate) async fn handle_create(
    State(state): State<Arc<GatewayState>>,
    Form(form): Form<QuestionForm>,
) -> Response {
    let mut page = list_page(&state);
    match page.submit_question(&form.question).await {
        Some(_) => Redirect::to("/").into_response(),
        None => {
            page.refresh().await;
            match render::list_page(&page) {
                Ok(html) => (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response(),
                Err(e) => e.into_response(),
            }
        }
    }
}

pub(crate) async fn handle_question(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Response {
    let mut page = question_page(&state);
    page.load(&id).await;
    render_question(&page, StatusCode::OK)
}

pub(crate) async fn handle_add_answer(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Form(form): Form<AnswerForm>,
) -> Response {
    let mut page = question_page(&state);
    page.load(&id).await;
    if page.submit_answer(&form.answer).await {
        redirect_to_question(&page)
    } else {
        render_question(&page, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

pub(crate) async fn handle_delete_answer(
    State(state): State<Arc<GatewayState>>,
    Path((id, answer_id)): Path<(String, String)>,
) -> Response {
    let mut page = question_page(&state);
    page.load(&id).await;
    if page.delete_answer(&answer_id).await {
        redirect_to_question(&page)
    } else {
        render_question(&page, StatusCode::NOT_FOUND)
    }
}

pub(crate) async fn handle_delete_question(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Response {
    let mut page = question_page(&state);
    page.load(&id).await;
    if page.delete_question().await {
        Redirect::to(page.redirect().unwrap_or("/")).into_response()
    } else {
        render_question(&page, StatusCode::NOT_FOUND)
    }
}
