//! End-to-end runs of the pipeline, from raw text to generated sentences.

use letter_gen_core::GenError;
use letter_gen_core::model::generation_input::{GenerationInput, StartSeed};
use letter_gen_core::model::generator::{LikelihoodBasedTextGenerator, NGramTextGenerator};
use letter_gen_core::model::language_profile::LanguageProfile;
use letter_gen_core::model::symbol_table::SymbolTable;
use letter_gen_core::text::codec::{decode_sentence, encode_corpus};
use letter_gen_core::text::format::translate_sentence_to_plain_text;
use letter_gen_core::text::tokenizer::tokenize;

const REFERENCE_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
	A stitch in time saves nine! Where there is smoke, there is fire?\n\
	All that glitters is not gold";

#[test]
fn cat_sat_pipeline() {
	let tokens = tokenize("cat sat.");
	let mut symbols = SymbolTable::new();
	let encoded = encode_corpus(&mut symbols, &tokens).unwrap();
	let profile = LanguageProfile::build(symbols, "en", &encoded, &[2]).unwrap();

	let symbols = profile.symbols();
	let id = |c| symbols.encode(c).unwrap();
	let cat = &encoded[0];
	assert_eq!(cat, &vec![id('_'), id('c'), id('a'), id('t'), id('_')]);

	let cat_bigrams: Vec<Vec<usize>> = cat.windows(2).map(<[usize]>::to_vec).collect();
	assert_eq!(cat_bigrams.len(), 4);
	assert_eq!(profile.table(2).unwrap().count(&cat_bigrams[0]), 1);

	let decoded = decode_sentence(symbols, &encoded[..1]);
	assert_eq!(translate_sentence_to_plain_text(&decoded), "Cat.");
}

#[test]
fn starter_run() {
	let profile = LanguageProfile::from_text(REFERENCE_TEXT, "en", &[2]).unwrap();
	let symbols = profile.symbols();
	assert!(symbols.count().unwrap() > 20);
	let lowest: String = symbols.letters().take(5).collect();
	assert_eq!(lowest, "_theq");

	let seed = [symbols.boundary_id().unwrap()];
	let mut greedy = NGramTextGenerator::new(&profile);
	let greedy_sentence = greedy.generate_decoded_sentence(&seed, 5).unwrap();
	assert!(!greedy_sentence.is_empty());

	let mut likelihood = LikelihoodBasedTextGenerator::new(&profile);
	let likelihood_sentence = likelihood.generate_decoded_sentence(&seed, 5).unwrap();
	assert!(!likelihood_sentence.is_empty());

	// likelihood generation is deterministic
	let mut again = LikelihoodBasedTextGenerator::new(&profile);
	assert_eq!(again.generate_decoded_sentence(&seed, 5).unwrap(), likelihood_sentence);
}

#[test]
fn greedy_unknown_context_never_fails() {
	let profile = LanguageProfile::from_text(REFERENCE_TEXT, "en", &[2]).unwrap();
	let mut generator = NGramTextGenerator::new(&profile);
	let unknown = profile.symbols().count().unwrap() + 10;
	let expected = *profile.table(2).unwrap().most_frequent().unwrap().last().unwrap();
	assert_eq!(generator.generate_letter(&[unknown]).unwrap(), expected);
}

#[test]
fn generation_input_drives_a_sentence() {
	let profile = LanguageProfile::from_text(REFERENCE_TEXT, "en", &[2, 3]).unwrap();
	let mut generator = LikelihoodBasedTextGenerator::new(&profile);
	let input = GenerationInput::new(3, StartSeed::Random(2));
	let sentence = generator.generate(&input).unwrap();
	assert!(sentence.ends_with('.'));

	let bad = GenerationInput::new(3, StartSeed::Custom("1".to_owned()));
	assert!(matches!(generator.generate(&bad), Err(GenError::UnknownLetter('1'))));
}

#[test]
fn construction_errors_are_distinguishable() {
	assert!(matches!(LanguageProfile::from_text("", "en", &[2]), Err(GenError::EmptyCorpus)));
	assert!(matches!(LanguageProfile::from_text("abc", "en", &[]), Err(GenError::NoNGramSizes)));
}
