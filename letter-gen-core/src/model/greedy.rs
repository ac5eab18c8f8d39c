use super::frequency_table::{first_max, FrequencyTable};
use super::generator::{LetterSelector, UsedNGrams};
use super::language_profile::LanguageProfile;
use super::symbol_table::LetterId;
use crate::error::{GenError, Result};

/// Picks the most frequent n-gram continuing the context.
///
/// Keys already emitted in the current cycle are skipped. When no unused
/// key continues the context, the table's globally most frequent key is
/// used instead (without being recorded).
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Greedy {
	/// The most frequent key of `table` starting with `context` and not used yet.
	pub(crate) fn best_unused<'a>(table: &'a FrequencyTable, context: &[LetterId], used: &UsedNGrams) -> Option<&'a [LetterId]> {
		let size = table.size();
		first_max(table.with_prefix(context).filter(|(ngram, _)| !used.contains(size, ngram)))
	}
}

impl LetterSelector for Greedy {
	fn select(&self, profile: &LanguageProfile, context: &[LetterId], used: &mut UsedNGrams) -> Result<LetterId> {
		let size = context.len() + 1;
		let table = profile.table(size).ok_or(GenError::NoTableForSize(size))?;
		used.refresh(table);

		if let Some(ngram) = Self::best_unused(table, context, used) {
			used.mark(table, ngram);
			return last_letter(ngram, size);
		}

		log::warn!("no unused {size}-gram follows {context:?}, using the most frequent one");
		let ngram = table.most_frequent().ok_or(GenError::NoTableForSize(size))?;
		last_letter(ngram, size)
	}
}

pub(crate) fn last_letter(ngram: &[LetterId], size: usize) -> Result<LetterId> {
	ngram.last().copied().ok_or(GenError::NoTableForSize(size))
}
