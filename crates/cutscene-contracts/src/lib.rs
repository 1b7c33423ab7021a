//! # cutscene-contracts
//!
//! Shared types for the cutscene authoring pipeline.
//!
//! All crates in the workspace import from here. No validation logic lives
//! in this crate — only the document object model, diagnostics, and error
//! types.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod transition;
