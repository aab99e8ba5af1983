//! Question storage
//!
//! [`QuestionStore`] is the seam procedures talk to; [`InMemoryStore`] is the
//! process-lifetime implementation. Each trait method is one atomic
//! read-modify-write, so callers never observe a half-applied mutation.

use parking_lot::RwLock;

use crate::error::NotFound;
use crate::ids::IdGenerator;
use crate::model::{seed_questions, Answer, Question};

/// Ordered collection of questions
pub trait QuestionStore: Send + Sync + std::fmt::Debug {
    /// All questions, insertion order
    fn list(&self) -> Vec<Question>;

    fn get(&self, id: &str) -> Option<Question>;

    /// Append a new question with a fresh id and no answers
    fn create(&self, text: String, ids: &dyn IdGenerator) -> Question;

    /// Replace the text of an existing question
    fn update_text(&self, id: &str, text: String) -> Result<Question, NotFound>;

    /// Remove a question together with its answers
    fn remove(&self, id: &str) -> Result<Question, NotFound>;

    /// Append an answer with an id fresh within the parent
    fn add_answer(
        &self,
        question_id: &str,
        text: String,
        ids: &dyn IdGenerator,
    ) -> Result<Answer, NotFound>;

    fn remove_answer(&self, question_id: &str, answer_id: &str) -> Result<Answer, NotFound>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draw ids until one is not `taken`
fn fresh_id(ids: &dyn IdGenerator, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id();
        if !taken(&id) {
            return id;
        }
        tracing::debug!(%id, "generated id already in use, drawing another");
    }
}

/// Vec-backed store behind a single lock
#[derive(Debug, Default)]
pub struct InMemoryStore {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the seed record
    pub fn seeded() -> Self {
        Self::with_questions(seed_questions())
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }
}

impl QuestionStore for InMemoryStore {
    fn list(&self) -> Vec<Question> {
        self.questions.read().clone()
    }

    fn get(&self, id: &str) -> Option<Question> {
        self.questions.read().iter().find(|q| q.id == id).cloned()
    }

    fn create(&self, text: String, ids: &dyn IdGenerator) -> Question {
        let mut questions = self.questions.write();
        let id = fresh_id(ids, |candidate| questions.iter().any(|q| q.id == candidate));
        let question = Question::new(id, text);
        questions.push(question.clone());
        question
    }

    fn update_text(&self, id: &str, text: String) -> Result<Question, NotFound> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| NotFound::Question(id.to_string()))?;
        question.question = text;
        Ok(question.clone())
    }

    fn remove(&self, id: &str) -> Result<Question, NotFound> {
        let mut questions = self.questions.write();
        let index = questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| NotFound::Question(id.to_string()))?;
        Ok(questions.remove(index))
    }

    fn add_answer(
        &self,
        question_id: &str,
        text: String,
        ids: &dyn IdGenerator,
    ) -> Result<Answer, NotFound> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| NotFound::Question(question_id.to_string()))?;

        let id = fresh_id(ids, |candidate| question.has_answer(candidate));
        let answer = Answer::new(id, text);
        question.answers.push(answer.clone());
        Ok(answer)
    }

    fn remove_answer(&self, question_id: &str, answer_id: &str) -> Result<Answer, NotFound> {
        let mut questions = self.questions.write();
        let question = questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| NotFound::Question(question_id.to_string()))?;

        let index = question
            .answers
            .iter()
            .position(|a| a.id == answer_id)
            .ok_or_else(|| NotFound::Answer {
                question_id: question_id.to_string(),
                answer_id: answer_id.to_string(),
            })?;
        Ok(question.answers.remove(index))
    }

    fn len(&self) -> usize {
        self.questions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn test_create_skips_taken_ids() {
        let store = InMemoryStore::seeded();
        let ids = SequentialIds::new();

        let q = store.create("Second question here?".into(), &ids);
        assert_eq!(q.id, "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_answer_ids_unique_within_parent() {
        let store = InMemoryStore::seeded();
        let ids = SequentialIds::new();

        let a = store
            .add_answer("1", "A third answer to it".into(), &ids)
            .unwrap();
        assert_eq!(a.id, "3");

        let ids_for_fresh = SequentialIds::new();
        let q = store.create("A brand new question?".into(), &ids_for_fresh);
        let first = store
            .add_answer(&q.id, "First answer on the new one".into(), &ids_for_fresh)
            .unwrap();
        assert_ne!(first.id, q.id);
    }

    #[test]
    fn test_remove_cascades() {
        let store = InMemoryStore::seeded();
        let removed = store.remove("1").unwrap();
        assert_eq!(removed.answers.len(), 2);
        assert!(store.is_empty());
        assert_eq!(store.remove("1"), Err(NotFound::Question("1".into())));
    }

    #[test]
    fn test_remove_answer_preserves_order() {
        let store = InMemoryStore::seeded();
        let ids = SequentialIds::starting_at(10);
        store.add_answer("1", "Answer number ten".into(), &ids).unwrap();

        store.remove_answer("1", "2").unwrap();
        let ids_left: Vec<_> = store
            .get("1")
            .unwrap()
            .answers
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids_left, vec!["1", "10"]);

        assert!(matches!(
            store.remove_answer("1", "2"),
            Err(NotFound::Answer { .. })
        ));
        assert!(matches!(
            store.remove_answer("9", "1"),
            Err(NotFound::Question(_))
        ));
    }
}
