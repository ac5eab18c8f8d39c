//! Error type shared by every module of the crate.
//!
//! Invalid inputs and missing lookups are reported through [`GenError`]
//! instead of sentinel values. Generation code recovers from some of them
//! (see the fallback rules of each selector) and propagates the rest.

use thiserror::Error;

use crate::model::symbol_table::LetterId;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors produced while building profiles or generating text.
#[derive(Error, Debug)]
pub enum GenError {
	/// The symbol table holds no letter yet.
	#[error("symbol table is empty")]
	EmptySymbolTable,

	/// A letter was looked up that has no id.
	#[error("unknown letter {0:?}")]
	UnknownLetter(char),

	/// An id was looked up that maps to no letter.
	#[error("unknown letter id {0}")]
	UnknownId(LetterId),

	/// The boundary marker has not been observed yet.
	#[error("boundary marker has no id yet")]
	BoundaryNotAssigned,

	/// An n-gram size of zero was requested.
	#[error("invalid n-gram size {0}, must be >= 1")]
	InvalidNGramSize(usize),

	/// A profile was built without any n-gram size.
	#[error("no n-gram size configured")]
	NoNGramSizes,

	/// A profile was built from a corpus without words.
	#[error("training corpus is empty")]
	EmptyCorpus,

	/// No frequency table of the required size exists in the profile.
	#[error("no frequency table of size {0}")]
	NoTableForSize(usize),

	/// Likelihood computations need at least one context letter.
	#[error("generation context is empty")]
	EmptyContext,

	/// A parameter is outside of its valid range.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Two frequency tables of different sizes were combined.
	#[error("n-gram size mismatch: expected {expected}, found {found}")]
	SizeMismatch { expected: usize, found: usize },

	/// I/O failure while reading a reference text or a cached profile.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A cached profile could not be encoded or decoded.
	#[error("serialization error: {0}")]
	Serialization(#[from] postcard::Error),
}
