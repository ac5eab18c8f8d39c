use crate::model::symbol_table::BOUNDARY;

/// Renders decoded words as a plain sentence.
///
/// All letters are concatenated, every doubled boundary marker becomes one
/// space, remaining markers are removed, the first letter is capitalized and
/// a period is appended. Returns an empty string for an empty sentence.
pub fn translate_sentence_to_plain_text<W: AsRef<[char]>>(decoded_sentence: &[W]) -> String {
	if decoded_sentence.is_empty() {
		return String::new();
	}
	let letters: String = decoded_sentence
		.iter()
		.flat_map(|word| word.as_ref().iter())
		.collect();
	format_plain_text(&letters)
}

/// Applies the boundary-to-space rule on an already concatenated letter string.
pub fn format_plain_text(letters: &str) -> String {
	let doubled: String = [BOUNDARY, BOUNDARY].iter().collect();
	let spaced = letters.replace(&doubled, " ").replace(BOUNDARY, "");

	let mut sentence = capitalize(&spaced);
	sentence.push('.');
	sentence
}

fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first
			.to_uppercase()
			.chain(chars.flat_map(char::to_lowercase))
			.collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn word(s: &str) -> Vec<char> {
		s.chars().collect()
	}

	#[test]
	fn single_word() {
		assert_eq!(translate_sentence_to_plain_text(&[word("_cat_")]), "Cat.");
	}

	#[test]
	fn words_are_joined_by_spaces() {
		let sentence = [word("_cat_"), word("_sat_"), word("_on_")];
		assert_eq!(translate_sentence_to_plain_text(&sentence), "Cat sat on.");
	}

	#[test]
	fn empty_sentence_is_empty_string() {
		let empty: [Vec<char>; 0] = [];
		assert_eq!(translate_sentence_to_plain_text(&empty), "");
	}

	#[test]
	fn lone_markers_are_dropped() {
		assert_eq!(format_plain_text("_hi"), "Hi.");
		assert_eq!(format_plain_text("a_b"), "Ab.");
		assert_eq!(format_plain_text("___x"), " x.");
	}
}
