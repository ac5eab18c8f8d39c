use super::frequency_table::first_max;
use super::generator::{LetterSelector, UsedNGrams};
use super::greedy::last_letter;
use super::language_profile::LanguageProfile;
use super::symbol_table::LetterId;
use crate::error::{GenError, Result};

/// Picks the letter with the highest conditional probability given the context.
///
/// Ties go to the key seen first in the corpus. Repetitions are not avoided.
///
/// # Fallbacks
/// - No key continues the context (or no table of that size): the first id
///   of the most frequent unigram
/// - No unigram table either: the last id of the most frequent key of the
///   context-sized table
#[derive(Debug, Clone, Copy, Default)]
pub struct Likelihood;

impl LetterSelector for Likelihood {
	fn select(&self, profile: &LanguageProfile, context: &[LetterId], _used: &mut UsedNGrams) -> Result<LetterId> {
		let size = context.len() + 1;
		let likelihoods = profile.likelihoods(context)?;
		if let Some(ngram) = first_max(likelihoods.into_iter()) {
			return last_letter(ngram, size);
		}

		if let Some(unigram) = profile.table(1).and_then(|table| table.most_frequent()) {
			log::warn!("no {size}-gram follows {context:?}, using the most frequent letter");
			return unigram.first().copied().ok_or(GenError::NoTableForSize(1));
		}

		let table = profile.table(size).ok_or(GenError::NoTableForSize(size))?;
		log::warn!("no {size}-gram follows {context:?}, using the most frequent {size}-gram");
		let ngram = table.most_frequent().ok_or(GenError::NoTableForSize(size))?;
		last_letter(ngram, size)
	}
}
