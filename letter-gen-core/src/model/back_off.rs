use super::generator::{LetterSelector, UsedNGrams};
use super::greedy::{last_letter, Greedy};
use super::language_profile::LanguageProfile;
use super::symbol_table::LetterId;
use crate::error::{GenError, Result};

/// Greedy selection that backs off to shorter contexts.
///
/// The full context is tried first against the `len + 1` table. When no
/// unused key continues it (or no such table exists), the oldest letter is
/// dropped and the next smaller table is tried, down to the empty context
/// on the unigram table. If even that fails, the most frequent key of the
/// largest table not longer than `len + 1` is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackOff;

impl LetterSelector for BackOff {
	fn select(&self, profile: &LanguageProfile, context: &[LetterId], used: &mut UsedNGrams) -> Result<LetterId> {
		for start in 0..=context.len() {
			let window = &context[start..];
			let size = window.len() + 1;
			let Some(table) = profile.table(size) else {
				continue;
			};
			used.refresh(table);
			if let Some(ngram) = Greedy::best_unused(table, window, used) {
				if start > 0 {
					log::debug!("backed off from {}-grams to {size}-grams", context.len() + 1);
				}
				used.mark(table, ngram);
				return last_letter(ngram, size);
			}
		}

		let size = context.len() + 1;
		let table = (1..=size)
			.rev()
			.find_map(|size| profile.table(size))
			.ok_or(GenError::NoTableForSize(size))?;
		log::warn!("no context of {context:?} matched, using the most frequent {}-gram", table.size());
		let ngram = table.most_frequent().ok_or(GenError::NoTableForSize(table.size()))?;
		last_letter(ngram, table.size())
	}
}
