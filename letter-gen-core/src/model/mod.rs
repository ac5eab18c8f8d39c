//! Top-level module for the letter n-gram model and its generators.
//!
//! This module provides:
//! - The letter/id mapping (`SymbolTable`)
//! - Fixed-size n-gram counts (`FrequencyTable`)
//! - The trained model owning both (`LanguageProfile`)
//! - Interchangeable letter selection strategies (`Greedy`, `Likelihood`, `BackOff`)
//! - A shared word and sentence driver (`TextGenerator`)
//! - Generation configuration (`GenerationInput`)

/// Bidirectional mapping between letters and dense ids.
///
/// Also defines the reserved boundary marker.
pub mod symbol_table;

/// Counts of all n-grams of one size, in first-seen order.
///
/// Supports merging tables built from separate corpus chunks.
pub mod frequency_table;

/// Trained model: one symbol table and one frequency table per n-gram size.
///
/// Supports sequential and parallel construction, likelihood queries,
/// and a `postcard` cache on disk.
pub mod language_profile;

/// Word and sentence generation driver plus the `LetterSelector` seam.
pub mod generator;

/// Most frequent continuation, avoiding repeated n-grams.
pub mod greedy;

/// Highest conditional probability continuation.
pub mod likelihood;

/// Greedy continuation that drops context letters on a miss.
pub mod back_off;

/// Generation parameters: word count, word length cap, seed strategy.
pub mod generation_input;
