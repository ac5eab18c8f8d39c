use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::symbol_table::LetterId;
use crate::error::{GenError, Result};

/// An ordered sequence of letter ids.
pub type NGram = Vec<LetterId>;

/// Counts of every n-gram of one fixed size `n` seen in a corpus.
///
/// Keys keep their first-seen order. Every query that picks "the" maximum
/// returns the first maximal key in that order, which makes generation
/// deterministic.
///
/// # Invariants
/// - `size >= 1`
/// - Every key has exactly `size` ids
/// - Every count is >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct FrequencyTable {
	/// The order of the table (number of ids per key)
	size: usize,
	/// Keys and counts in first-seen order
	entries: Vec<(NGram, usize)>,
	/// Position of each key inside `entries`
	index: HashMap<NGram, usize>,
}

/// Serialized form, the index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct RawTable {
	size: usize,
	entries: Vec<(NGram, usize)>,
}

impl FrequencyTable {
	/// Creates an empty table for n-grams of `size` ids.
	///
	/// # Errors
	/// Returns [`GenError::InvalidNGramSize`] if `size == 0`.
	pub fn new(size: usize) -> Result<Self> {
		if size == 0 {
			return Err(GenError::InvalidNGramSize(size));
		}
		Ok(Self { size, entries: Vec::new(), index: HashMap::new() })
	}

	pub fn size(&self) -> usize {
		self.size
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|(_, count)| count).sum()
	}

	/// Adds every contiguous window of `size` ids of `word`.
	///
	/// Words shorter than `size` contribute nothing.
	pub fn add_word(&mut self, word: &[LetterId]) {
		for window in word.windows(self.size) {
			self.add_ngram(window, 1);
		}
	}

	fn add_ngram(&mut self, ngram: &[LetterId], count: usize) {
		match self.index.get(ngram) {
			Some(position) => self.entries[*position].1 += count,
			None => {
				self.index.insert(ngram.to_vec(), self.entries.len());
				self.entries.push((ngram.to_vec(), count));
			}
		}
	}

	/// Count of `ngram`, `0` if never seen.
	pub fn count(&self, ngram: &[LetterId]) -> usize {
		self.index.get(ngram).map_or(0, |position| self.entries[*position].1)
	}

	/// All keys and counts in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (&[LetterId], usize)> {
		self.entries.iter().map(|(ngram, count)| (ngram.as_slice(), *count))
	}

	/// Keys whose first `prefix.len()` ids equal `prefix`, in first-seen order.
	pub fn with_prefix<'a>(&'a self, prefix: &[LetterId]) -> impl Iterator<Item = (&'a [LetterId], usize)> {
		self.iter().filter(move |(ngram, _)| ngram.starts_with(prefix))
	}

	/// The first key holding the highest count, `None` for an empty table.
	pub fn most_frequent(&self) -> Option<&[LetterId]> {
		first_max(self.iter())
	}

	/// Merges another table of the same size into this one.
	///
	/// Counts of shared keys are summed; keys only present in `other` are
	/// appended in `other`'s order.
	///
	/// # Errors
	/// Returns [`GenError::SizeMismatch`] if the sizes differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.size != other.size {
			return Err(GenError::SizeMismatch { expected: self.size, found: other.size });
		}
		for (ngram, count) in other.iter() {
			self.add_ngram(ngram, count);
		}
		Ok(())
	}
}

/// Returns the first item with the highest score.
///
/// `Iterator::max_by_key` keeps the last maximum, generation needs the first.
pub(crate) fn first_max<'a, S: PartialOrd>(items: impl Iterator<Item = (&'a [LetterId], S)>) -> Option<&'a [LetterId]> {
	let mut best: Option<(&[LetterId], S)> = None;
	for (ngram, score) in items {
		let better = match &best {
			Some((_, top)) => score > *top,
			None => true,
		};
		if better {
			best = Some((ngram, score));
		}
	}
	best.map(|(ngram, _)| ngram)
}

impl TryFrom<RawTable> for FrequencyTable {
	type Error = GenError;

	fn try_from(raw: RawTable) -> Result<Self> {
		let mut table = FrequencyTable::new(raw.size)?;
		for (ngram, count) in raw.entries {
			if ngram.len() != raw.size {
				return Err(GenError::SizeMismatch { expected: raw.size, found: ngram.len() });
			}
			if count == 0 {
				return Err(GenError::InvalidInput(format!("{ngram:?} has a zero count")));
			}
			table.add_ngram(&ngram, count);
		}
		Ok(table)
	}
}

impl From<FrequencyTable> for RawTable {
	fn from(table: FrequencyTable) -> Self {
		Self { size: table.size, entries: table.entries }
	}
}
