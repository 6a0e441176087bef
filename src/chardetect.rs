use charset_detector_rs::detect;
use clap::Parser;
use env_logger::Env;
use serde::Serialize;
use std::path::PathBuf;
use std::{fs, process};

/////////////////////////////////////////////////////////////////////////////////////
// Chardetect CLI application
/////////////////////////////////////////////////////////////////////////////////////

#[derive(Parser, Debug)]
#[command(
    name = "Universal character encoding detector. Discover the originating encoding of a byte stream."
)]
#[command(author, version, about, long_about = None)]
struct CliDetectorArgs {
    /// File(s) to be analysed
    #[arg(required = true, action = clap::ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Display complementary information about the detection process on stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Only output the charset detected to STDOUT. Disabling JSON output.
    #[arg(short, long, default_value_t = false)]
    pub minimal: bool,
}

#[derive(Debug, Serialize)]
struct CliDetectorResult {
    /// Path to analysed file
    pub path: PathBuf,
    /// Guessed encoding
    pub encoding: Option<&'static str>,
    /// Confidence of the guess, 0.0 to 1.0
    pub confidence: f64,
    /// Language tag carried by the winning prober
    pub language: Option<&'static str>,
}

fn chardetect(args: &CliDetectorArgs) -> Result<i32, String> {
    let mut results: Vec<CliDetectorResult> = vec![];

    // go through the files
    for path in &args.files {
        let full_path = fs::canonicalize(path).map_err(|err| err.to_string())?;
        let buffer = fs::read(&full_path)
            .map_err(|err| format!("Error reading from file {:?}: {}", full_path, err))?;
        let verdict = detect(&buffer);
        if verdict.is_undecided() {
            eprintln!(
                "Unable to identify the originating encoding for {:?}.",
                full_path
            );
        }
        results.push(CliDetectorResult {
            path: full_path,
            encoding: verdict.encoding,
            confidence: verdict.confidence,
            language: verdict.language,
        });
    }

    // print out results
    if args.minimal {
        for result in &results {
            println!("{}", result.encoding.unwrap_or("undefined"));
        }
    } else {
        println!(
            "{}",
            if results.len() > 1 {
                serde_json::to_string_pretty(&results).unwrap()
            } else {
                serde_json::to_string_pretty(&results[0]).unwrap()
            }
        );
    }
    Ok(0)
}

pub fn main() {
    let args = CliDetectorArgs::parse();

    // verbose mode
    if args.verbose {
        env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();
    }

    // run detection
    match chardetect(&args) {
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
        Ok(exit_code) => process::exit(exit_code),
    }
}
