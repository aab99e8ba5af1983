//! Form-driven UI
//!
//! The view-models in [`page`] hold no authority over data: after every
//! successful mutation they invalidate the affected `getOne` entry and the
//! `getAll` list in their [`cache::QueryCache`] and refetch. That refetch is
//! the only thing keeping a view consistent with the store.

pub mod cache;
pub mod page;
pub mod render;
pub(crate) mod routes;

pub use cache::{QueryCache, SharedCache};
pub use page::{FormField, ListPage, QuestionPage, ViewState};
