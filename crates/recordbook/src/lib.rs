#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Recordbook
//!
//! Ordered, index-addressed record lists edited through validated forms.
//!
//! Recordbook provides the pieces every list-editing screen needs:
//! - [`RecordStore`] and its persisted variant [`PersistentStore`]
//! - [`Schema`] rule tables (required, one-of, pattern)
//! - [`FormController`] drafts with batch validation on submit
//! - [`RecordFilter`] text/category narrowing that maps back to backing indices
//! - [`KeyValueStore`] persistence port with memory and file backends
//!
//! ## Example
//!
//! ```rust
//! use recordbook::records::{grade_schema, GradeEntry};
//! use recordbook::{FormController, RecordStore, SubmitOutcome};
//!
//! let mut store: RecordStore<GradeEntry> = RecordStore::new();
//! let mut form = FormController::new(grade_schema());
//!
//! form.set_value("subject", "Programming");
//! form.set_value("grade", "B+");
//! assert_eq!(form.submit(&mut store), SubmitOutcome::Created(0));
//!
//! // Blank subject: refused, draft kept.
//! form.set_value("subject", "   ");
//! assert!(matches!(form.submit(&mut store), SubmitOutcome::Rejected(_)));
//! assert_eq!(store.len(), 1);
//! ```

pub mod filter;
pub mod form;
pub mod gpa;
pub mod records;
pub mod schema;
pub mod storage;
pub mod store;

pub use filter::{Filterable, RecordFilter, distinct_categories};
pub use form::{Draft, FieldState, FormController, Record, RecordSink, SubmitOutcome, Values};
pub use gpa::{Grade, GpaReading, format_gpa, grade_point_average};
pub use schema::{Choice, FieldErrors, FieldKind, FieldSpec, Rule, Schema, date_pattern};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{PersistentStore, RecordStore};
