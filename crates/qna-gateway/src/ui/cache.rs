//! Client-side query cache
//!
//! Holds the last `getAll` and `getOne(id)` results. Nothing here refreshes on
//! its own: every successful mutation must call [`QueryCache::invalidate_after`]
//! before the view refetches.

use parking_lot::Mutex;
use qna_core::{MutationOutput, Question};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache handle shared between views of one client
pub type SharedCache = Arc<Mutex<QueryCache>>;

#[derive(Debug, Default)]
pub struct QueryCache {
    all: Option<Vec<Question>>,
    one: HashMap<String, Option<Question>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCache {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn all(&self) -> Option<&Vec<Question>> {
        self.all.as_ref()
    }

    pub fn put_all(&mut self, questions: Vec<Question>) {
        self.all = Some(questions);
    }

    /// `None` when not cached; `Some(None)` when cached as absent
    pub fn one(&self, id: &str) -> Option<&Option<Question>> {
        self.one.get(id)
    }

    pub fn put_one(&mut self, id: impl Into<String>, question: Option<Question>) {
        self.one.insert(id.into(), question);
    }

    pub fn invalidate_one(&mut self, id: &str) {
        self.one.remove(id);
    }

    pub fn invalidate_all(&mut self) {
        self.all = None;
    }

    /// Drop every entry a mutation may have made stale
    pub fn invalidate_after(&mut self, output: &impl MutationOutput) {
        self.invalidate_one(output.question_id());
        self.invalidate_all();
    }
}
