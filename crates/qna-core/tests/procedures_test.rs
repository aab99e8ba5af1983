//! Behavioural tests for the `questions.*` procedure set

use std::sync::Arc;

use proptest::prelude::*;
use qna_core::{
    AddAnswerInput, CreateQuestionInput, DeleteAnswerInput, ErrorCode, IdInput, InMemoryStore,
    NotFound, ProcedureError, Procedures, QuestionStore, SequentialIds, UpdateQuestionInput,
};

fn empty() -> Procedures {
    Procedures::new(Arc::new(InMemoryStore::new()))
}

fn seeded() -> Procedures {
    Procedures::new(Arc::new(InMemoryStore::seeded()))
}

#[test]
fn test_create_then_get_one_round_trip() {
    let procs = empty();
    let created = procs
        .create(CreateQuestionInput::new("Is this long enough?"))
        .unwrap();

    let fetched = procs.get_one(IdInput::new(&created.id)).unwrap().unwrap();
    assert_eq!(fetched.question, "Is this long enough?");
    assert!(fetched.answers.is_empty());
}

#[test]
fn test_create_appends_with_fresh_ids() {
    let procs = seeded();
    let a = procs
        .create(CreateQuestionInput::new("First new question?"))
        .unwrap();
    let b = procs
        .create(CreateQuestionInput::new("Second new question?"))
        .unwrap();

    assert_ne!(a.id, b.id);
    let ids: Vec<_> = procs.get_all().into_iter().map(|q| q.id).collect();
    assert_eq!(ids, vec!["1".to_string(), a.id, b.id]);
}

#[test]
fn test_get_one_absent_is_none() {
    let procs = seeded();
    assert_eq!(procs.get_one(IdInput::new("missing")).unwrap(), None);
}

#[test]
fn test_update_replaces_text_in_place() {
    let procs = seeded();
    let updated = procs
        .update(UpdateQuestionInput::new("1", "What is the meaning of it all?"))
        .unwrap();
    assert_eq!(updated.question, "What is the meaning of it all?");
    assert_eq!(updated.answers.len(), 2);

    let err = procs
        .update(UpdateQuestionInput::new("2", "What about this one then?"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn test_update_validates_before_lookup() {
    let procs = seeded();
    let err = procs
        .update(UpdateQuestionInput::new("missing", "short"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
}

#[test]
fn test_delete_missing_leaves_store_unchanged() {
    let procs = seeded();
    let before = procs.get_all();

    let err = procs.delete(IdInput::new("404")).unwrap_err();
    assert!(matches!(err, ProcedureError::NotFound(NotFound::Question(_))));
    assert_eq!(procs.get_all(), before);
}

#[test]
fn test_delete_removes_question_and_answers() {
    let procs = seeded();
    let out = procs.delete(IdInput::new("1")).unwrap();
    assert_eq!(out.id, "1");
    assert!(procs.get_all().is_empty());
    assert_eq!(procs.get_one(IdInput::new("1")).unwrap(), None);
}

#[test]
fn test_add_answer_missing_parent() {
    let procs = seeded();
    let before = procs.get_all();

    let err = procs
        .add_answer(AddAnswerInput::new("nope", "A perfectly fine answer"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Post not found");
    assert_eq!(procs.get_all(), before);
}

#[test]
fn test_add_answer_appends_and_preserves_order() {
    let procs = seeded();
    let out = procs
        .add_answer(AddAnswerInput::new("1", "It is forty-two, of course."))
        .unwrap();
    assert_eq!(out.question_id, "1");

    let q = procs.get_one(IdInput::new("1")).unwrap().unwrap();
    let ids: Vec<_> = q.answers.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", out.new_answer.id.as_str()]);
    assert_eq!(q.answers[2].answer, "It is forty-two, of course.");
}

#[test]
fn test_add_answer_with_sequential_ids_skips_seeded() {
    let procs = seeded().with_ids(Arc::new(SequentialIds::new()));
    let out = procs
        .add_answer(AddAnswerInput::new("1", "A third seeded-style answer"))
        .unwrap();
    assert_eq!(out.new_answer.id, "3");
}

#[test]
fn test_delete_answer_scenario() {
    let procs = seeded();
    let out = procs
        .delete_answer(DeleteAnswerInput::new("1", "2"))
        .unwrap();
    assert_eq!(out.id, "2");
    assert_eq!(out.question_id, "1");

    let q = procs.get_one(IdInput::new("1")).unwrap().unwrap();
    assert_eq!(q.answers.len(), 1);
    assert_eq!(q.answers[0].id, "1");
}

#[test]
fn test_delete_answer_is_not_idempotent() {
    let procs = seeded();
    procs
        .delete_answer(DeleteAnswerInput::new("1", "1"))
        .unwrap();

    let err = procs
        .delete_answer(DeleteAnswerInput::new("1", "1"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Answer not found");
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = procs
        .delete_answer(DeleteAnswerInput::new("7", "2"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Post not found");
}

#[test]
fn test_concurrent_creates_are_all_kept() {
    let store = Arc::new(InMemoryStore::new());
    let procs = Procedures::new(store.clone());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let procs = procs.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    procs
                        .create(CreateQuestionInput::new(format!("Thread {t} question {i}?")))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.len(), 200);
    let mut ids: Vec<_> = store.list().into_iter().map(|q| q.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

proptest! {
    #[test]
    fn prop_short_question_rejected_store_unchanged(text in "[a-z ?]{0,12}") {
        prop_assume!(text.trim().chars().count() < 10);
        let procs = seeded();
        let before = procs.get_all();

        let err = procs.create(CreateQuestionInput::new(text)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::BadRequest);
        prop_assert_eq!(procs.get_all(), before);
    }

    #[test]
    fn prop_valid_question_appends_exactly_one(body in "[A-Za-z]{10}[A-Za-z ]{0,30}") {
        let text = format!("{}?", body.trim_end());
        let procs = seeded();

        let created = procs.create(CreateQuestionInput::new(text.clone())).unwrap();
        let all = procs.get_all();
        prop_assert_eq!(all.len(), 2);
        prop_assert_eq!(&all[1], &created);
        prop_assert_eq!(created.question, text);
        prop_assert!(created.answers.is_empty());
        prop_assert_ne!(created.id, "1".to_string());
    }
}
