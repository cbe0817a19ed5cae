//! Parameterized read queries over the competitor store.
//!
//! A caller picks a [`QueryTemplate`], supplies [`Filters`], and gets back a
//! [`RowSet`] or a [`QueryError`] it can display.

pub mod clause;
pub mod error;
pub mod filters;
pub mod rowset;
pub mod service;
pub mod templates;

pub use error::QueryError;
pub use filters::Filters;
pub use rowset::{Row, RowSet, Value};
pub use service::QueryService;
pub use templates::QueryTemplate;
