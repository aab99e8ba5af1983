//! HTML rendering for the UI pages

use qna_core::Question;
use url::Url;

use super::page::{FormField, ListPage, QuestionPage, ViewState};
use crate::api::QuestionsApi;
use crate::{GatewayError, Result};

const STYLE: &str = "body{display:flex;flex-direction:column;align-items:center;gap:2rem;\
min-height:100vh;margin:0;padding:3rem;background:#262626;color:#fff;font-family:sans-serif}\
form{display:flex;flex-direction:column;gap:.5rem}\
label{display:flex;flex-direction:column;gap:.5rem;width:30rem}\
input[type=text]{border:0;border-radius:.375rem;padding:.5rem;background:#404040;color:#f5f5f5}\
.row{display:flex;align-items:center;justify-content:space-between;gap:.5rem}\
.answer{border-radius:.375rem;padding:1rem;background:#404040}\
.error{color:#ef4444;font-weight:500}\
.submit{border:0;border-radius:.25rem;padding:.5rem;background:#22c55e}\
.trash{border:0;border-radius:.25rem;padding:.5rem;background:#ef4444;color:#fff}";

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn heading(text: &str) -> String {
    format!("<h1>{}</h1>\n", escape(text))
}

fn field_error(field: &FormField) -> String {
    field
        .error
        .as_deref()
        .map(|e| format!("<span class=\"error\">{}</span>\n", escape(e)))
        .unwrap_or_default()
}

fn delete_button(action: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\" class=\"trash\" \
title=\"Delete\">&#128465;</button></form>\n",
        escape(action)
    )
}

/// Path of a question page, with `tail` segments appended after the id.
/// Every segment is percent-encoded.
pub fn question_path(id: &str, tail: &[&str]) -> Result<String> {
    if [id].iter().chain(tail).any(|s| matches!(*s, "" | "." | "..")) {
        return Err(GatewayError::BadInput(format!("unusable path segment in {id:?}")));
    }
    let mut url = Url::parse("http://localhost/q")
        .map_err(|e| GatewayError::Internal(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| GatewayError::Internal("base URL cannot carry a path".to_string()))?
        .push(id)
        .extend(tail);
    Ok(url.path().to_string())
}

fn render_question(
    question: &Question,
    answer: &FormField,
    mutation_error: Option<&str>,
) -> Result<String> {
    let mut body = String::new();

    body.push_str("<div class=\"row\">\n");
    body.push_str(&heading(&question.question));
    body.push_str(&delete_button(&question_path(&question.id, &["delete"])?));
    body.push_str("</div>\n");

    if let Some(message) = mutation_error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n<label>Add an answer\n\
<input type=\"text\" name=\"answer\" placeholder=\"Answer the question...\" value=\"{}\">\n{}</label>\n\
<button type=\"submit\" class=\"submit\">Submit</button>\n</form>\n",
        escape(&question_path(&question.id, &["answers"])?),
        escape(&answer.value),
        field_error(answer)
    ));

    body.push_str("<div class=\"answers\">\n");
    for a in &question.answers {
        body.push_str("<div class=\"row answer\">\n");
        body.push_str(&format!("<p>{}</p>\n", escape(&a.answer)));
        body.push_str(&delete_button(&question_path(
            &question.id,
            &["answers", a.id.as_str(), "delete"],
        )?));
        body.push_str("</div>\n");
    }
    body.push_str("</div>\n");
    Ok(body)
}

/// Render the single-question page in its current state
pub fn question_page<A: QuestionsApi>(page: &QuestionPage<A>) -> Result<String> {
    let (title, body) = match page.state() {
        ViewState::InvalidId => ("Invalid ID".to_string(), heading("Invalid ID")),
        ViewState::Error(message) => (message.clone(), heading(message)),
        ViewState::Loading => ("Loading...".to_string(), heading("Loading...")),
        ViewState::NoData => ("No data".to_string(), heading("No data")),
        ViewState::Ready(question) => (
            question.question.clone(),
            render_question(question, page.answer_field(), page.mutation_error())?,
        ),
    };
    Ok(layout(&title, &body))
}

/// Render the list page
pub fn list_page<A: QuestionsApi>(page: &ListPage<A>) -> Result<String> {
    let field = page.question_field();
    let mut body = heading("Questions");

    body.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n<label>Ask a question\n\
<input type=\"text\" name=\"question\" placeholder=\"What would you like to know?\" value=\"{}\">\n{}</label>\n\
<button type=\"submit\" class=\"submit\">Submit</button>\n</form>\n",
        escape(&field.value),
        field_error(field)
    ));

    match page.questions() {
        Ok(questions) if questions.is_empty() => body.push_str("<p>No questions yet</p>\n"),
        Ok(questions) => {
            body.push_str("<ul>\n");
            for q in questions {
                body.push_str(&format!(
                    "<li><a href=\"{}\">{}</a> ({} answers)</li>\n",
                    escape(&question_path(&q.id, &[])?),
                    escape(&q.question),
                    q.answers.len()
                ));
            }
            body.push_str("</ul>\n");
        }
        Err(message) => body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message))),
    }

    Ok(layout("Questions", &body))
}
