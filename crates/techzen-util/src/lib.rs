//! techzen-util - Core utilities and foundation types.
//!
//! This crate provides the types shared by every stage of the TechZen
//! pipeline: source positions ([`span`]) and lex/parse error types
//! ([`error`]).

pub mod error;
pub mod span;

pub use error::{ErrorKind, SourceError};
pub use span::{FileId, SourceFile, SourceMap, Span};
