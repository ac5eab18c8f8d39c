use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use super::frequency_table::FrequencyTable;
use super::symbol_table::{LetterId, SymbolTable};
use crate::error::{GenError, Result};
use crate::io::{build_output_path, read_text};
use crate::text::codec::encode_corpus;
use crate::text::tokenizer::tokenize;

/// The trained model: a symbol table plus one frequency table per n-gram size.
///
/// # Responsibilities
/// - Count n-grams of every configured size over an encoded corpus
/// - Answer table lookups by size and conditional likelihood queries
/// - Cache itself on disk next to its reference text
///
/// # Invariants
/// - The set of sizes is fixed once built
/// - Every id found in a table is known to `symbols`
/// - The language label is cosmetic
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageProfile {
	language: String,
	symbols: SymbolTable,
	tables: BTreeMap<usize, FrequencyTable>,
}

impl LanguageProfile {
	/// Builds a profile from an encoded corpus in one sequential pass.
	///
	/// For every size `n` in `sizes` and every word, each contiguous window of
	/// `n` ids is counted. Duplicate sizes are ignored.
	///
	/// # Errors
	/// - [`GenError::NoNGramSizes`] if `sizes` is empty
	/// - [`GenError::InvalidNGramSize`] if a size is `0`
	/// - [`GenError::EmptyCorpus`] / [`GenError::EmptySymbolTable`] for an empty corpus or table
	/// - [`GenError::UnknownId`] if the corpus holds ids `symbols` does not know
	pub fn build(symbols: SymbolTable, language: &str, corpus: &[Vec<LetterId>], sizes: &[usize]) -> Result<Self> {
		Self::validate(&symbols, corpus, sizes)?;
		let tables = count_tables(corpus, sizes)?;
		let profile = Self { language: language.to_owned(), symbols, tables };
		profile.log_built();
		Ok(profile)
	}

	/// Same result as [`build`](Self::build), counted on several threads.
	///
	/// The corpus is cut into `cpus * 8` chunks, each chunk is counted on its
	/// own thread and the partial tables are merged back in chunk order, so
	/// counts and first-seen key order match the sequential build.
	pub fn build_parallel(symbols: SymbolTable, language: &str, corpus: &[Vec<LetterId>], sizes: &[usize]) -> Result<Self> {
		Self::validate(&symbols, corpus, sizes)?;

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = corpus.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		for (position, chunk) in corpus.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<Vec<LetterId>> = chunk.to_vec();
			let sizes = sizes.to_vec();

			thread::spawn(move || {
				// The receiver outlives every worker
				let _ = tx.send((position, count_tables(&chunk, &sizes)));
			});
			spawned += 1;
		}
		drop(tx);

		let mut partials: Vec<(usize, Result<BTreeMap<usize, FrequencyTable>>)> = rx.iter().collect();
		if partials.len() != spawned {
			return Err(GenError::InvalidInput(format!(
				"{} of {} counting threads did not report",
				spawned - partials.len(),
				spawned
			)));
		}
		partials.sort_by_key(|(position, _)| *position);

		let mut tables = empty_tables(sizes)?;
		for (_, partial) in partials {
			for (size, table) in partial? {
				if let Some(existing) = tables.get_mut(&size) {
					existing.merge(&table)?;
				}
			}
		}

		let profile = Self { language: language.to_owned(), symbols, tables };
		profile.log_built();
		Ok(profile)
	}

	/// Tokenizes and encodes `text` with a fresh symbol table, then builds.
	pub fn from_text(text: &str, language: &str, sizes: &[usize]) -> Result<Self> {
		let mut symbols = SymbolTable::new();
		let corpus = encode_corpus(&mut symbols, &tokenize(text))?;
		Self::build_parallel(symbols, language, &corpus, sizes)
	}

	/// Loads the cached profile of a reference text, or builds and caches it.
	///
	/// - The cache lives next to the text with a `.bin` extension
	/// - A cache built for other sizes or another language is rebuilt
	/// - A cache older than the text, or one that fails to load, is rebuilt
	/// - Uses `postcard` for compact serialization
	pub fn load_or_build<P: AsRef<Path>>(filepath: P, language: &str, sizes: &[usize]) -> Result<Self> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		if binary_data_path.exists() {
			if is_newer(filepath.as_ref(), &binary_data_path) {
				log::info!("{} changed since it was cached, rebuilding", filepath.as_ref().display());
			} else {
				match Self::load(&binary_data_path) {
					Ok(cached) if cached.language == language && cached.has_sizes(sizes) => return Ok(cached),
					Ok(_) => log::info!("cached profile {} does not match, rebuilding", binary_data_path.display()),
					Err(e) => log::warn!("cannot read cached profile {}: {e}, rebuilding", binary_data_path.display()),
				}
			}
		}

		let profile = Self::from_text(&read_text(&filepath)?, language, sizes)?;
		profile.save(&binary_data_path)?;
		Ok(profile)
	}

	/// Writes the profile to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(&path, bytes)?;
		log::info!("saved profile '{}' to {}", self.language, path.as_ref().display());
		Ok(())
	}

	/// Reads a profile written by [`save`](Self::save).
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(&path)?;
		let profile: Self = postcard::from_bytes(&bytes)?;
		log::info!("loaded profile '{}' from {}", profile.language, path.as_ref().display());
		Ok(profile)
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn symbols(&self) -> &SymbolTable {
		&self.symbols
	}

	/// The frequency table of n-grams of `size` ids, if configured.
	pub fn table(&self, size: usize) -> Option<&FrequencyTable> {
		self.tables.get(&size)
	}

	/// Configured sizes, ascending.
	pub fn sizes(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
		self.tables.keys().copied()
	}

	/// Probability of `letter` following `context`.
	///
	/// Uses the table of size `context.len() + 1`: the counts of the keys
	/// starting with `context` form the denominator, those also ending with
	/// `letter` the numerator. Returns `0.0` when the context never occurs or
	/// no such table exists.
	///
	/// # Errors
	/// [`GenError::EmptyContext`] if `context` is empty.
	pub fn maximum_likelihood(&self, letter: LetterId, context: &[LetterId]) -> Result<f64> {
		if context.is_empty() {
			return Err(GenError::EmptyContext);
		}
		let Some(table) = self.table(context.len() + 1) else {
			return Ok(0.0);
		};

		let mut numerator = 0;
		let mut denominator = 0;
		for (ngram, count) in table.with_prefix(context) {
			denominator += count;
			if ngram.last() == Some(&letter) {
				numerator += count;
			}
		}
		if denominator == 0 {
			return Ok(0.0);
		}
		Ok(numerator as f64 / denominator as f64)
	}

	/// Every key following `context` with its likelihood, in first-seen order.
	///
	/// Equivalent to calling [`maximum_likelihood`](Self::maximum_likelihood)
	/// for the last id of each matching key, with the denominator summed once.
	pub fn likelihoods(&self, context: &[LetterId]) -> Result<Vec<(&[LetterId], f64)>> {
		if context.is_empty() {
			return Err(GenError::EmptyContext);
		}
		let Some(table) = self.table(context.len() + 1) else {
			return Ok(Vec::new());
		};
		let matching: Vec<(&[LetterId], usize)> = table.with_prefix(context).collect();
		let total: usize = matching.iter().map(|(_, count)| count).sum();
		Ok(matching
			.into_iter()
			.map(|(ngram, count)| (ngram, count as f64 / total as f64))
			.collect())
	}

	fn has_sizes(&self, sizes: &[usize]) -> bool {
		let requested: BTreeSet<usize> = sizes.iter().copied().collect();
		requested.iter().eq(self.tables.keys())
	}

	fn validate(symbols: &SymbolTable, corpus: &[Vec<LetterId>], sizes: &[usize]) -> Result<()> {
		if sizes.is_empty() {
			return Err(GenError::NoNGramSizes);
		}
		if let Some(size) = sizes.iter().find(|size| **size == 0) {
			return Err(GenError::InvalidNGramSize(*size));
		}
		if corpus.is_empty() {
			return Err(GenError::EmptyCorpus);
		}
		let count = symbols.count()?;
		if let Some(id) = corpus.iter().flatten().find(|id| **id >= count) {
			return Err(GenError::UnknownId(*id));
		}
		Ok(())
	}

	fn log_built(&self) {
		for (size, table) in &self.tables {
			log::info!(
				"profile '{}': {}-gram table with {} keys ({} occurrences)",
				self.language,
				size,
				table.len(),
				table.total()
			);
		}
	}
}

/// Whether `path` was modified after `than`. Unreadable times count as not newer.
fn is_newer(path: &Path, than: &Path) -> bool {
	let modified = |p: &Path| std::fs::metadata(p).and_then(|meta| meta.modified()).ok();
	match (modified(path), modified(than)) {
		(Some(text), Some(cache)) => text > cache,
		_ => false,
	}
}

fn empty_tables(sizes: &[usize]) -> Result<BTreeMap<usize, FrequencyTable>> {
	sizes.iter().map(|size| Ok((*size, FrequencyTable::new(*size)?))).collect()
}

fn count_tables(corpus: &[Vec<LetterId>], sizes: &[usize]) -> Result<BTreeMap<usize, FrequencyTable>> {
	let mut tables = empty_tables(sizes)?;
	for table in tables.values_mut() {
		for word in corpus {
			table.add_word(word);
		}
	}
	Ok(tables)
}
