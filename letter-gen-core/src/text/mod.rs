//! Text side of the pipeline: raw text to letters, letters to ids and back.
//!
//! - [`tokenizer`]: splits a reference text into boundary-wrapped words
//! - [`codec`]: replaces letters with ids from a `SymbolTable` and back
//! - [`format`]: renders decoded words as a plain sentence

/// Sentence and word splitting.
pub mod tokenizer;

/// Corpus encoding and decoding through a symbol table.
pub mod codec;

/// Plain-text rendering of generated sentences.
pub mod format;

/// A word: letters (or letter ids) wrapped by the boundary marker.
pub type Word<T> = Vec<T>;

/// An ordered sequence of words.
pub type Corpus<T> = Vec<Word<T>>;
