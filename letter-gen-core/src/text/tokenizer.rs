use std::iter;

use super::{Corpus, Word};
use crate::model::symbol_table::BOUNDARY;

/// Splits a reference text into boundary-wrapped words.
///
/// - Lower-cases the whole text
/// - Splits sentences on `.`, `!` or `?` followed by a space, and on newlines
/// - Keeps only alphabetic characters and whitespace inside a sentence
/// - Splits on whitespace and wraps each word as `_ l1 .. lk _`
///
/// Punctuation that does not end a sentence is simply dropped, so
/// `"end.start"` yields the single word `endstart`.
pub fn tokenize(text: &str) -> Corpus<char> {
	let text = text.to_lowercase();
	split_sentences(&text)
		.into_iter()
		.flat_map(sentence_words)
		.collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
	let mut sentences = Vec::new();
	let mut start = 0;
	let mut chars = text.char_indices().peekable();

	while let Some((i, c)) = chars.next() {
		match c {
			'\n' => {
				sentences.push(&text[start..i]);
				start = i + c.len_utf8();
			}
			'.' | '!' | '?' => {
				if let Some(&(space, ' ')) = chars.peek() {
					sentences.push(&text[start..i]);
					chars.next();
					start = space + 1;
				}
			}
			_ => (),
		}
	}
	sentences.push(&text[start..]);
	sentences
}

fn sentence_words(sentence: &str) -> Vec<Word<char>> {
	let kept: String = sentence
		.chars()
		.filter(|c| c.is_alphabetic() || c.is_whitespace())
		.collect();

	kept.split_whitespace()
		.map(|word| {
			iter::once(BOUNDARY)
				.chain(word.chars())
				.chain(iter::once(BOUNDARY))
				.collect()
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(corpus: &Corpus<char>) -> Vec<String> {
		corpus.iter().map(|w| w.iter().collect()).collect()
	}

	#[test]
	fn wraps_every_word() {
		let corpus = tokenize("cat sat.");
		assert_eq!(words(&corpus), vec!["_cat_", "_sat_"]);
	}

	#[test]
	fn lowercases_and_drops_punctuation() {
		let corpus = tokenize("Hello, World! It's 42 degrees?\nNew line");
		assert_eq!(
			words(&corpus),
			vec!["_hello_", "_world_", "_its_", "_degrees_", "_new_", "_line_"]
		);
	}

	#[test]
	fn punctuation_without_space_glues_words() {
		assert_eq!(words(&tokenize("end.start")), vec!["_endstart_"]);
	}

	#[test]
	fn sentence_split_points() {
		assert_eq!(split_sentences("a. b! c? d\ne"), vec!["a", "b", "c", "d", "e"]);
		assert_eq!(split_sentences("no split."), vec!["no split."]);
	}

	#[test]
	fn empty_text_gives_empty_corpus() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" . ! \n 123").is_empty());
	}

	#[test]
	fn keeps_non_ascii_letters() {
		assert_eq!(words(&tokenize("Ёлка и мёд")), vec!["_ёлка_", "_и_", "_мёд_"]);
	}
}
