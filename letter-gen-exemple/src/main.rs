use std::path::PathBuf;

use clap::{ArgAction, Parser};
use env_logger::DEFAULT_FILTER_ENV;
use log::LevelFilter;

use letter_gen_core::model::generation_input::{GenerationInput, StartSeed};
use letter_gen_core::model::generator::{LikelihoodBasedTextGenerator, NGramTextGenerator};
use letter_gen_core::model::language_profile::LanguageProfile;

#[derive(Parser, Debug)]
#[command(author, version, about = "Letter n-gram text generation starter", long_about = None)]
struct Cli {
    /// Reference text to learn from
    #[arg(default_value = "./data/reference_text.txt")]
    text: PathBuf,

    /// N-gram sizes to build (repeat flag)
    #[arg(short, long = "size", value_name = "N", default_values_t = vec![2])]
    sizes: Vec<usize>,

    /// Number of words per generated sentence
    #[arg(short, long, default_value_t = 5)]
    words: usize,

    /// Maximum word length, seed included
    #[arg(long, default_value_t = 15)]
    max_length: usize,

    /// Seed letters of the first word (default: the word boundary)
    #[arg(long)]
    seed: Option<String>,

    /// Language label stored in the profile
    #[arg(long, default_value = "en")]
    language: String,

    /// Always rebuild the profile instead of reading the cached .bin
    #[arg(long)]
    no_cache: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

fn logger(verbose: u8, quiet: u8, env_filters: Option<&str>) -> env_logger::Builder {
    let level = if quiet > 0 {
        LevelFilter::Warn
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // RUST_LOG directives take precedence over -v/-q
    let mut builder = env_logger::Builder::new();
    builder.format_timestamp_millis();
    builder.filter_level(level);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    builder
}

fn init_logging(verbose: u8, quiet: u8) {
    let env_filters = std::env::var(DEFAULT_FILTER_ENV).ok();
    let _ = logger(verbose, quiet, env_filters.as_deref()).try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Build the profile from the reference text
    // A .bin cache next to the text is reused when it matches the sizes
    let profile = if cli.no_cache {
        LanguageProfile::from_text(&std::fs::read_to_string(&cli.text)?, &cli.language, &cli.sizes)?
    } else {
        LanguageProfile::load_or_build(&cli.text, &cli.language, &cli.sizes)?
    };

    // Letter ids are handed out in first-seen order
    let symbols = profile.symbols();
    let letters: Vec<char> = symbols.letters().collect();
    println!("The number of letters: {}", symbols.count()?);
    println!("The letters with the lowest ids: {:?}", &letters[..letters.len().min(5)]);
    println!("The letters with the highest ids: {:?}", &letters[letters.len().saturating_sub(5)..]);

    // Start seed can be set to
    // 'Boundary' to start like the beginning of a word
    // 'Custom' uses letters that must exist in the reference text
    // 'Random' uses a random prefix of the given length
    let start_seed = match cli.seed {
        Some(letters) => StartSeed::Custom(letters),
        None => StartSeed::Boundary,
    };
    let mut input = GenerationInput::new(cli.words, start_seed);
    input.set_word_max_length(cli.max_length)?;

    // Greedy generation: most frequent n-gram, avoiding repetitions
    let mut greedy = NGramTextGenerator::new(&profile);
    println!("Greedy: {}", greedy.generate(&input)?);

    // Likelihood generation: most probable letter for the context
    let mut likelihood = LikelihoodBasedTextGenerator::new(&profile);
    let sentence = likelihood.generate(&input)?;
    println!("Likelihood: {}", sentence);

    if sentence.is_empty() {
        return Err("Generation produced an empty sentence".into());
    }

    Ok(())
}
