use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Dense identifier of a letter inside one [`SymbolTable`].
pub type LetterId = usize;

/// Reserved marker wrapped around every word.
pub const BOUNDARY: char = '_';

/// Letter produced by best-effort decoding when an id is unknown.
pub const UNKNOWN_LETTER: char = '?';

/// Bidirectional mapping between letters and dense ids.
///
/// Ids are handed out in first-seen order starting at `0`. The boundary
/// marker is not special-cased: it receives its id the first time it is
/// encountered, like any other letter.
///
/// # Invariants
/// - `letters[id]` and `ids[letter]` are inverse of each other
/// - Once assigned, an id never changes
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<char>", into = "Vec<char>")]
pub struct SymbolTable {
	/// Letters indexed by their id (insertion order).
	letters: Vec<char>,
	/// Reverse index, letter to id.
	ids: HashMap<char, LetterId>,
}

impl SymbolTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Assigns an id to every letter of `words` that has none yet.
	///
	/// Letters are visited word by word, in order. Already known letters are
	/// left untouched. Returns the number of newly assigned ids.
	pub fn assign<W: AsRef<[char]>>(&mut self, words: &[W]) -> usize {
		let before = self.letters.len();
		for word in words {
			for letter in word.as_ref() {
				self.insert(*letter);
			}
		}
		self.letters.len() - before
	}

	/// Inserts a single letter and returns its id (existing or new).
	pub fn insert(&mut self, letter: char) -> LetterId {
		if let Some(id) = self.ids.get(&letter) {
			return *id;
		}
		let id = self.letters.len();
		self.letters.push(letter);
		self.ids.insert(letter, id);
		id
	}

	/// Number of distinct letters known.
	///
	/// # Errors
	/// [`GenError::EmptySymbolTable`] when nothing has been assigned yet.
	pub fn count(&self) -> Result<usize> {
		if self.letters.is_empty() {
			return Err(GenError::EmptySymbolTable);
		}
		Ok(self.letters.len())
	}

	pub fn is_empty(&self) -> bool {
		self.letters.is_empty()
	}

	/// Returns the id of `letter`.
	pub fn encode(&self, letter: char) -> Result<LetterId> {
		self.ids.get(&letter).copied().ok_or(GenError::UnknownLetter(letter))
	}

	/// Returns the letter behind `id`.
	pub fn decode(&self, id: LetterId) -> Result<char> {
		self.letters.get(id).copied().ok_or(GenError::UnknownId(id))
	}

	/// Like [`decode`](Self::decode) but yields [`UNKNOWN_LETTER`] for unknown ids.
	pub fn decode_lossy(&self, id: LetterId) -> char {
		match self.decode(id) {
			Ok(letter) => letter,
			Err(_) => {
				log::warn!("letter id {id} is unknown, decoded as {UNKNOWN_LETTER:?}");
				UNKNOWN_LETTER
			}
		}
	}

	/// Id of the [`BOUNDARY`] marker.
	///
	/// # Errors
	/// [`GenError::BoundaryNotAssigned`] if no word has been assigned yet.
	pub fn boundary_id(&self) -> Result<LetterId> {
		self.encode(BOUNDARY).map_err(|_| GenError::BoundaryNotAssigned)
	}

	/// Letters in id order.
	pub fn letters(&self) -> impl DoubleEndedIterator<Item = char> + ExactSizeIterator + '_ {
		self.letters.iter().copied()
	}
}

impl From<Vec<char>> for SymbolTable {
	fn from(letters: Vec<char>) -> Self {
		let mut table = SymbolTable::new();
		for letter in letters {
			table.insert(letter);
		}
		table
	}
}

impl From<SymbolTable> for Vec<char> {
	fn from(table: SymbolTable) -> Self {
		table.letters
	}
}
