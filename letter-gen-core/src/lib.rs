//! Letter-level n-gram language profiles and text generation.
//!
//! This crate provides:
//! - Tokenization of a reference text into boundary-wrapped words
//! - Letter encoding through a first-seen-order symbol table
//! - Frequency tables for any set of n-gram sizes
//! - Greedy, maximum-likelihood and back-off letter generators
//! - Plain-text rendering of generated sentences
//!
//! A typical run goes text → [`text::tokenizer::tokenize`] →
//! [`text::codec::encode_corpus`] → [`model::language_profile::LanguageProfile::build`]
//! → a generator from [`model::generator`].

/// Letter model and generation logic.
pub mod model;

/// Tokenization, encoding and formatting.
pub mod text;

/// Crate error type.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{GenError, Result};
