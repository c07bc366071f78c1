//! Lesson plan generator - drafts AI-generated lesson plans from reference documents
//!
//! A teacher supplies a topic, a lesson duration and one or more reference
//! documents. The documents are base64-encoded and sent with an instruction to
//! a hosted completion API; the returned plan is rendered with a small
//! markdown subset and can be exported as a Word-compatible file.

pub mod ai;
pub mod app;
pub mod encoder;
pub mod error;
pub mod export;
pub mod mime;
pub mod models;
pub mod prompts;
pub mod render;

pub use error::{Error, Result};
