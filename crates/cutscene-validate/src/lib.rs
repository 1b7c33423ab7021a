//! # cutscene-validate
//!
//! Schema validation for cutscene documents.
//!
//! This crate provides [`v1::V1SchemaValidator`], which implements the
//! [`SchemaValidator`] trait. It checks a parsed
//! [`CutsceneDoc`](cutscene_contracts::document::CutsceneDoc) in two phases:
//!
//! 1. **Collection** — every declared identifier (characters, backgrounds,
//!    sounds, beats) is gathered into a [`context::ValidationContext`],
//!    reporting duplicates along the way.
//! 2. **Checking** — entities, beat advance specs, and every action are
//!    validated against the schema rules, with cross-references resolved
//!    through the collected context.
//!
//! Validation is total: rule violations come back as
//! [`Diagnostic`](cutscene_contracts::diagnostic::Diagnostic) values in a
//! flat list, never as errors, and one violation never hides its siblings.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cutscene_contracts::document::CutsceneDoc;
//! use cutscene_validate::{v1::V1SchemaValidator, SchemaValidator};
//!
//! let doc = CutsceneDoc::from_json_file(std::path::Path::new("intro.json")).ok();
//! for diag in V1SchemaValidator.validate(doc.as_ref()) {
//!     eprintln!("{} at {}: {}", diag.code, diag.path, diag.message);
//! }
//! ```

use cutscene_contracts::diagnostic::Diagnostic;
use cutscene_contracts::document::CutsceneDoc;

pub mod actions;
pub mod context;
pub mod fields;
pub mod registry;
pub mod v1;

/// A validator for one schema version of the cutscene document format.
pub trait SchemaValidator {
    /// Validate a parsed document, returning every rule violation found.
    ///
    /// `None` stands for a document that failed to parse at all. An empty
    /// vector means the document is valid.
    fn validate(&self, doc: Option<&CutsceneDoc>) -> Vec<Diagnostic>;
}
