//! QnA Core - questions, answers and the procedures that mutate them
//!
//! # Architecture
//!
//! ```text
//! untyped input ──▶ schema (RuleSet) ──▶ Procedures ──▶ QuestionStore
//!                                            │
//!                                            └──▶ output naming the affected question
//! ```
//!
//! - [`schema`]: the single rule table shared by the RPC boundary and UI forms
//! - [`store`]: the store abstraction and its in-memory implementation
//! - [`procedures`]: `questions.*` operations and name-based dispatch
//! - [`ids`]: identifier generators
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use qna_core::{CreateQuestionInput, IdInput, InMemoryStore, Procedures};
//!
//! let procedures = Procedures::new(Arc::new(InMemoryStore::new()));
//! let created = procedures
//!     .create(CreateQuestionInput::new("Is this long enough?"))
//!     .unwrap();
//!
//! let fetched = procedures.get_one(IdInput::new(created.id.clone())).unwrap();
//! assert_eq!(fetched.unwrap().question, "Is this long enough?");
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations)]

pub mod error;
pub mod ids;
pub mod model;
pub mod procedures;
pub mod schema;
pub mod store;

pub use error::{ErrorCode, Issue, NotFound, ProcedureError, Result, ValidationError};
pub use ids::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
pub use model::{seed_questions, Answer, Question};
pub use procedures::{AnswerAdded, AnswerDeleted, Deleted, MutationOutput, Procedure, Procedures};
pub use schema::{
    AddAnswerInput, CreateQuestionInput, DeleteAnswerInput, FieldRule, IdInput, Input, RuleSet,
    Strictness, UpdateQuestionInput,
};
pub use store::{InMemoryStore, QuestionStore};
