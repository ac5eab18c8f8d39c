use std::collections::{HashMap, HashSet};

use super::back_off::BackOff;
use super::frequency_table::{FrequencyTable, NGram};
use super::generation_input::{GenerationInput, DEFAULT_WORD_MAX_LENGTH};
use super::greedy::Greedy;
use super::language_profile::LanguageProfile;
use super::likelihood::Likelihood;
use super::symbol_table::LetterId;
use crate::error::{GenError, Result};
use crate::text::codec::decode_sentence;
use crate::text::format::format_plain_text;
use crate::text::{Corpus, Word};

/// Strategy picking the next letter for a context.
///
/// Implementations only decide on one letter; word and sentence assembly is
/// shared by [`TextGenerator`].
pub trait LetterSelector {
	/// Picks the letter following `context`.
	///
	/// `used` is the anti-repetition state of the calling generator; selectors
	/// that do not avoid repetitions simply ignore it.
	fn select(&self, profile: &LanguageProfile, context: &[LetterId], used: &mut UsedNGrams) -> Result<LetterId>;
}

/// N-grams already emitted by a generator, tracked per table size.
///
/// Each set is bounded by its table: once every key of a table has been used,
/// the set is flagged exhausted and [`refresh`](Self::refresh) starts a new
/// cycle for it.
#[derive(Debug, Default, Clone)]
pub struct UsedNGrams {
	tables: HashMap<usize, UsedSet>,
}

#[derive(Debug, Default, Clone)]
struct UsedSet {
	keys: HashSet<NGram>,
	exhausted: bool,
}

impl UsedNGrams {
	pub fn contains(&self, size: usize, ngram: &[LetterId]) -> bool {
		self.tables.get(&size).is_some_and(|set| set.keys.contains(ngram))
	}

	/// Number of keys of the `size` table used in the current cycle.
	pub fn len(&self, size: usize) -> usize {
		self.tables.get(&size).map_or(0, |set| set.keys.len())
	}

	pub fn is_exhausted(&self, size: usize) -> bool {
		self.tables.get(&size).is_some_and(|set| set.exhausted)
	}

	/// Records `ngram` as used for `table`.
	pub fn mark(&mut self, table: &FrequencyTable, ngram: &[LetterId]) {
		let set = self.tables.entry(table.size()).or_default();
		set.keys.insert(ngram.to_vec());
		if set.keys.len() >= table.len() {
			set.exhausted = true;
		}
	}

	/// Clears the set of `table` if every one of its keys has been used.
	///
	/// Returns `true` when a new cycle started.
	pub fn refresh(&mut self, table: &FrequencyTable) -> bool {
		match self.tables.get_mut(&table.size()) {
			Some(set) if set.exhausted => {
				log::debug!("all {} {}-grams used, starting a new cycle", table.len(), table.size());
				set.keys.clear();
				set.exhausted = false;
				true
			}
			_ => false,
		}
	}

	pub fn clear(&mut self) {
		self.tables.clear();
	}
}

/// Letter, word and sentence generation over a read-only profile.
///
/// The selector decides on letters; this driver seeds words, slides the
/// context window, stops on the boundary marker and decodes the result.
///
/// A generator owns mutable anti-repetition state, so each concurrent caller
/// needs its own instance. The profile itself can be shared freely.
#[derive(Debug, Clone)]
pub struct TextGenerator<'a, S: LetterSelector> {
	profile: &'a LanguageProfile,
	selector: S,
	used: UsedNGrams,
}

/// Greedy generation: highest raw count, avoiding repeated n-grams.
pub type NGramTextGenerator<'a> = TextGenerator<'a, Greedy>;

/// Highest conditional probability (maximum likelihood).
pub type LikelihoodBasedTextGenerator<'a> = TextGenerator<'a, Likelihood>;

/// Greedy generation that shortens the context on a miss.
pub type BackOffGenerator<'a> = TextGenerator<'a, BackOff>;

impl<'a> TextGenerator<'a, Greedy> {
	pub fn new(profile: &'a LanguageProfile) -> Self {
		Self::with_selector(profile, Greedy)
	}
}

impl<'a> TextGenerator<'a, Likelihood> {
	pub fn new(profile: &'a LanguageProfile) -> Self {
		Self::with_selector(profile, Likelihood)
	}

	/// See [`LanguageProfile::maximum_likelihood`].
	pub fn maximum_likelihood(&self, letter: LetterId, context: &[LetterId]) -> Result<f64> {
		self.profile.maximum_likelihood(letter, context)
	}
}

impl<'a> TextGenerator<'a, BackOff> {
	pub fn new(profile: &'a LanguageProfile) -> Self {
		Self::with_selector(profile, BackOff)
	}
}

impl<'a, S: LetterSelector> TextGenerator<'a, S> {
	pub fn with_selector(profile: &'a LanguageProfile, selector: S) -> Self {
		Self { profile, selector, used: UsedNGrams::default() }
	}

	pub fn profile(&self) -> &'a LanguageProfile {
		self.profile
	}

	pub fn used(&self) -> &UsedNGrams {
		&self.used
	}

	/// Forgets every n-gram used so far.
	pub fn reset(&mut self) {
		self.used.clear();
	}

	/// Generates the letter following `context`.
	pub fn generate_letter(&mut self, context: &[LetterId]) -> Result<LetterId> {
		self.selector.select(self.profile, context, &mut self.used)
	}

	/// Generates one word starting with `context`.
	///
	/// The word is seeded with `context`, then letters are appended one by
	/// one, each chosen from the trailing window of `context.len()` ids. The
	/// word ends after a boundary marker or once it holds `max_length` ids.
	/// With `max_length == 1` the boundary marker is appended right away.
	///
	/// # Errors
	/// - [`GenError::InvalidInput`] if `max_length` is zero or shorter than `context`
	/// - [`GenError::BoundaryNotAssigned`] for a profile without boundary marker
	/// - Any error of the selector
	pub fn generate_word(&mut self, context: &[LetterId], max_length: usize) -> Result<Word<LetterId>> {
		if max_length == 0 {
			return Err(GenError::InvalidInput("Word max length must be >= 1".to_owned()));
		}
		let boundary = self.profile.symbols().boundary_id()?;
		let mut word = context.to_vec();
		if max_length == 1 {
			word.push(boundary);
			return Ok(word);
		}
		if context.len() > max_length {
			return Err(GenError::InvalidInput(format!(
				"Seed of {} letters exceeds the word max length {}",
				context.len(),
				max_length
			)));
		}

		let window = context.len();
		while word.len() < max_length {
			let letter = self.generate_letter(&word[word.len() - window..])?;
			word.push(letter);
			if letter == boundary {
				break;
			}
		}
		Ok(word)
	}

	/// Generates `word_count` words with the default word length cap.
	///
	/// Only the first word uses `context`; every following word is seeded with
	/// the last id of the previous one.
	pub fn generate_sentence(&mut self, context: &[LetterId], word_count: usize) -> Result<Corpus<LetterId>> {
		self.generate_sentence_with_limit(context, word_count, DEFAULT_WORD_MAX_LENGTH)
	}

	/// [`generate_sentence`](Self::generate_sentence) with an explicit word length cap.
	pub fn generate_sentence_with_limit(
		&mut self,
		context: &[LetterId],
		word_count: usize,
		word_max_length: usize,
	) -> Result<Corpus<LetterId>> {
		let mut sentence = Vec::with_capacity(word_count);
		let mut context = context.to_vec();
		for _ in 0..word_count {
			let word = self.generate_word(&context, word_max_length)?;
			context = word.last().map(|id| vec![*id]).unwrap_or_default();
			sentence.push(word);
		}
		Ok(sentence)
	}

	/// Generates a sentence and renders it as plain text.
	pub fn generate_decoded_sentence(&mut self, context: &[LetterId], word_count: usize) -> Result<String> {
		let sentence = self.generate_sentence(context, word_count)?;
		Ok(self.render(&sentence))
	}

	/// Generates a sentence following `input` and renders it as plain text.
	pub fn generate(&mut self, input: &GenerationInput) -> Result<String> {
		let context = input.start_seed.resolve(self.profile)?;
		let sentence = self.generate_sentence_with_limit(&context, input.word_count, input.word_max_length())?;
		Ok(self.render(&sentence))
	}

	fn render(&self, sentence: &[Word<LetterId>]) -> String {
		let letters: String = decode_sentence(self.profile.symbols(), sentence).into_iter().flatten().collect();
		format_plain_text(&letters)
	}
}
