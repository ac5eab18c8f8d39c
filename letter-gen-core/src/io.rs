use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a whole UTF-8 reference text into memory.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/reference_text.txt` + `"bin"` → `data/reference_text.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/reference_text.txt", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/reference_text.bin"));
	}

	#[test]
	fn output_path_needs_a_filename() {
		assert!(build_output_path("/", "bin").is_err());
	}
}
