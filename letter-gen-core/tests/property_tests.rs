//! Property-based tests for the letter n-gram pipeline.
//!
//! Uses proptest to check counting and generation invariants over many
//! random corpora.

use std::collections::HashSet;

use letter_gen_core::model::generator::{BackOffGenerator, LikelihoodBasedTextGenerator, NGramTextGenerator};
use letter_gen_core::model::language_profile::LanguageProfile;
use letter_gen_core::model::symbol_table::{SymbolTable, BOUNDARY};
use letter_gen_core::text::codec::encode_corpus;
use letter_gen_core::text::tokenizer::tokenize;
use proptest::prelude::*;

/// Texts of 1 to 13 words over a small alphabet, so n-grams repeat often
fn small_text() -> impl Strategy<Value = String> {
	"[a-e]{1,6}( [a-e]{1,6}){0,12}"
}

fn encoded(text: &str) -> (SymbolTable, Vec<Vec<usize>>) {
	let mut symbols = SymbolTable::new();
	let corpus = encode_corpus(&mut symbols, &tokenize(text)).unwrap();
	(symbols, corpus)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn prop_every_letter_round_trips(text in small_text()) {
		let (symbols, _) = encoded(&text);
		let distinct: HashSet<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
		prop_assert_eq!(symbols.count().unwrap(), distinct.len() + 1);
		for letter in distinct {
			let id = symbols.encode(letter).unwrap();
			prop_assert_eq!(symbols.decode(id).unwrap(), letter);
		}
	}

	#[test]
	fn prop_boundary_is_always_assigned(text in small_text()) {
		let profile = LanguageProfile::from_text(&text, "en", &[2]).unwrap();
		let boundary = profile.symbols().boundary_id().unwrap();
		prop_assert_eq!(boundary, 0);
		prop_assert_eq!(profile.symbols().decode(boundary).unwrap(), BOUNDARY);
	}

	#[test]
	fn prop_counts_match_window_totals(text in small_text(), n in 1usize..6) {
		let (symbols, corpus) = encoded(&text);
		let profile = LanguageProfile::build(symbols, "en", &corpus, &[n]).unwrap();
		let windows: usize = corpus.iter().map(|word| (word.len() + 1).saturating_sub(n)).sum();
		prop_assert_eq!(profile.table(n).unwrap().total(), windows);
	}

	#[test]
	fn prop_parallel_build_is_identical(text in small_text()) {
		let (symbols, corpus) = encoded(&text);
		let sequential = LanguageProfile::build(symbols.clone(), "en", &corpus, &[1, 2, 3]).unwrap();
		let parallel = LanguageProfile::build_parallel(symbols, "en", &corpus, &[1, 2, 3]).unwrap();
		prop_assert_eq!(sequential, parallel);
	}

	#[test]
	fn prop_likelihoods_sum_to_one(text in small_text()) {
		let profile = LanguageProfile::from_text(&text, "en", &[2]).unwrap();
		let letters = profile.symbols().count().unwrap();
		for context in 0..letters {
			let sum: f64 = (0..letters)
				.map(|letter| profile.maximum_likelihood(letter, &[context]).unwrap())
				.sum();
			let observed = profile.table(2).unwrap().with_prefix(&[context]).next().is_some();
			if observed {
				prop_assert!((sum - 1.0).abs() < 1e-9);
			} else {
				prop_assert_eq!(sum, 0.0);
			}
		}
	}

	#[test]
	fn prop_words_stay_within_max_length(text in small_text(), max_length in 2usize..20) {
		let profile = LanguageProfile::from_text(&text, "en", &[1, 2, 3]).unwrap();
		let boundary = profile.symbols().boundary_id().unwrap();

		let mut greedy = NGramTextGenerator::new(&profile);
		let mut likelihood = LikelihoodBasedTextGenerator::new(&profile);
		let mut back_off = BackOffGenerator::new(&profile);
		for _ in 0..3 {
			prop_assert!(greedy.generate_word(&[boundary], max_length).unwrap().len() <= max_length);
			prop_assert!(likelihood.generate_word(&[boundary], max_length).unwrap().len() <= max_length);
			prop_assert!(back_off.generate_word(&[boundary], max_length).unwrap().len() <= max_length);
		}
	}

	#[test]
	fn prop_decoded_sentences_are_formatted(text in small_text(), words in 1usize..6) {
		let profile = LanguageProfile::from_text(&text, "en", &[2]).unwrap();
		let boundary = profile.symbols().boundary_id().unwrap();
		let mut generator = NGramTextGenerator::new(&profile);
		let sentence = generator.generate_decoded_sentence(&[boundary], words).unwrap();
		prop_assert!(sentence.ends_with('.'));
		prop_assert!(!sentence.contains(BOUNDARY));
	}
}
