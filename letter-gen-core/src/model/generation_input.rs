use rand::seq::IteratorRandom;

use super::language_profile::LanguageProfile;
use super::symbol_table::LetterId;
use crate::error::{GenError, Result};

/// Default cap on the length of a generated word, seed included.
pub const DEFAULT_WORD_MAX_LENGTH: usize = 15;

/// Default number of words per generated sentence.
pub const DEFAULT_WORD_COUNT: usize = 5;

/// Strategy used to select the seed context of the first word.
///
/// # Variants
/// - `Boundary`: start from the boundary marker alone, like the start of a word.
/// - `Ids(Vec<LetterId>)`: use the given ids as is.
/// - `Custom(String)`: encode the given letters through the profile's symbol table.
/// - `Random(usize)`: pick a random context of the given length among the
///   prefixes of the `len + 1` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartSeed {
	#[default]
	Boundary,
	Ids(Vec<LetterId>),
	Custom(String),
	Random(usize),
}

impl StartSeed {
	/// Turns the seed into a concrete context for `profile`.
	///
	/// # Errors
	/// - [`GenError::UnknownLetter`] if a custom letter has no id
	/// - [`GenError::NoTableForSize`] if no table can serve a random seed
	/// - [`GenError::InvalidInput`] for an empty custom seed or a zero-length random seed
	pub fn resolve(&self, profile: &LanguageProfile) -> Result<Vec<LetterId>> {
		match self {
			StartSeed::Boundary => Ok(vec![profile.symbols().boundary_id()?]),
			StartSeed::Ids(ids) => Ok(ids.clone()),
			StartSeed::Custom(letters) => {
				if letters.is_empty() {
					return Err(GenError::InvalidInput("Custom seed cannot be empty".to_owned()));
				}
				letters
					.chars()
					.flat_map(char::to_lowercase)
					.map(|letter| profile.symbols().encode(letter))
					.collect()
			}
			StartSeed::Random(0) => Err(GenError::InvalidInput("Random seed length must be >= 1".to_owned())),
			StartSeed::Random(length) => {
				let table = profile.table(length + 1).ok_or(GenError::NoTableForSize(length + 1))?;
				table
					.iter()
					.choose(&mut rand::rng())
					.map(|(ngram, _)| ngram[..*length].to_vec())
					.ok_or(GenError::NoTableForSize(length + 1))
			}
		}
	}
}

/// Generation parameters for one sentence.
///
/// # Invariants
/// - `word_max_length >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of words in the sentence.
	pub word_count: usize,

	/// Maximum length of a word, seed included.
	word_max_length: usize,

	/// Seed context of the first word.
	pub start_seed: StartSeed,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			word_count: DEFAULT_WORD_COUNT,
			word_max_length: DEFAULT_WORD_MAX_LENGTH,
			start_seed: StartSeed::Boundary,
		}
	}
}

impl GenerationInput {
	pub fn new(word_count: usize, start_seed: StartSeed) -> Self {
		Self { word_count, start_seed, ..Self::default() }
	}

	pub fn word_max_length(&self) -> usize {
		self.word_max_length
	}

	/// Sets the word length cap.
	///
	/// # Errors
	/// Returns an error if `word_max_length` is zero.
	pub fn set_word_max_length(&mut self, word_max_length: usize) -> Result<()> {
		if word_max_length == 0 {
			return Err(GenError::InvalidInput("Word max length must be >= 1".to_owned()));
		}
		self.word_max_length = word_max_length;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile() -> LanguageProfile {
		LanguageProfile::from_text("hello there", "en", &[2, 3]).unwrap()
	}

	#[test]
	fn boundary_seed() {
		let profile = profile();
		let boundary = profile.symbols().boundary_id().unwrap();
		assert_eq!(StartSeed::Boundary.resolve(&profile).unwrap(), vec![boundary]);
	}

	#[test]
	fn custom_seed_is_lowercased_and_encoded() {
		let profile = profile();
		let symbols = profile.symbols();
		let seed = StartSeed::Custom("He".to_owned()).resolve(&profile).unwrap();
		assert_eq!(seed, vec![symbols.encode('h').unwrap(), symbols.encode('e').unwrap()]);

		assert!(matches!(StartSeed::Custom("hz".to_owned()).resolve(&profile), Err(GenError::UnknownLetter('z'))));
		assert!(matches!(StartSeed::Custom(String::new()).resolve(&profile), Err(GenError::InvalidInput(_))));
	}

	#[test]
	fn random_seed_is_a_known_prefix() {
		let profile = profile();
		let seed = StartSeed::Random(2).resolve(&profile).unwrap();
		assert_eq!(seed.len(), 2);
		assert!(profile.table(3).unwrap().with_prefix(&seed).next().is_some());

		assert!(matches!(StartSeed::Random(5).resolve(&profile), Err(GenError::NoTableForSize(6))));
		assert!(matches!(StartSeed::Random(0).resolve(&profile), Err(GenError::InvalidInput(_))));
	}

	#[test]
	fn word_max_length_must_be_positive() {
		let mut input = GenerationInput::default();
		assert_eq!(input.word_max_length(), DEFAULT_WORD_MAX_LENGTH);
		assert!(input.set_word_max_length(0).is_err());
		input.set_word_max_length(4).unwrap();
		assert_eq!(input.word_max_length(), 4);
	}
}
