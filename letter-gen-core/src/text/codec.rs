use super::{Corpus, Word};
use crate::error::Result;
use crate::model::symbol_table::{LetterId, SymbolTable};

/// Encodes a tokenized corpus into letter ids.
///
/// Every letter without an id gets one first (in encounter order), so this
/// call grows `symbols` as a side effect.
pub fn encode_corpus(symbols: &mut SymbolTable, corpus: &[Word<char>]) -> Result<Corpus<LetterId>> {
	symbols.assign(corpus);
	corpus
		.iter()
		.map(|word| word.iter().map(|letter| symbols.encode(*letter)).collect::<Result<Word<LetterId>>>())
		.collect()
}

/// Decodes id words back into letters.
///
/// Decoding is best effort: unknown ids become
/// [`UNKNOWN_LETTER`](crate::model::symbol_table::UNKNOWN_LETTER).
pub fn decode_sentence(symbols: &SymbolTable, sentence: &[Word<LetterId>]) -> Corpus<char> {
	sentence
		.iter()
		.map(|word| word.iter().map(|id| symbols.decode_lossy(*id)).collect())
		.collect()
}
