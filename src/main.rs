//! cminus-lex: prints the token table of a C-minus source file.
//!
//! Usage:
//!   cminus-lex                    read stdin, write stdout
//!   cminus-lex FILE               write the table to `a.out`
//!   cminus-lex FILE -o OUTPUT     write the table to OUTPUT

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    process,
};

use clap::Parser as ClapParser;
use cminus_lexer::{
    display_error,
    errors::errors::{Error, ErrorImpl},
    init_tracing,
    lexer::{lexer::Scanner, source::SourceReader},
    report::report::{write_token_table, ScanSummary},
};
use tracing::{info, warn};

/// Output file used when an input file is given without `-o`.
const DEFAULT_OUTPUT: &str = "a.out";

#[derive(ClapParser, Debug)]
#[command(name = "cminus-lex", about = "Tokenize C-minus source and print a token table")]
struct Cli {
    /// Source file to scan. Reads standard input when omitted.
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Where to write the token table.
    #[arg(short = 'o', value_name = "OUTPUT", requires = "input")]
    output: Option<String>,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let file_name = cli.input.clone().unwrap_or_else(|| String::from("<stdin>"));

    match run(&cli) {
        Ok(summary) => {
            let stderr = io::stderr();
            let mut stderr = stderr.lock();
            for error in summary.errors.iter().chain(summary.read_error.iter()) {
                if let Err(e) = display_error(error, &file_name, &mut stderr) {
                    warn!(error = %e, "failed to write diagnostic");
                }
            }

            if !summary.is_clean() {
                process::exit(1);
            }
        }
        Err(error) => {
            if let Err(e) = display_error(&error, &file_name, &mut io::stderr()) {
                warn!(error = %e, "failed to write diagnostic");
            }
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<ScanSummary, Error> {
    match &cli.input {
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            scan(stdin.lock(), stdout.lock())
        }
        Some(input) => {
            let source = File::open(input).map_err(|e| open_failed(input, e))?;
            let output_path = cli.output.as_deref().unwrap_or(DEFAULT_OUTPUT);
            let output = File::create(output_path).map_err(|e| open_failed(output_path, e))?;

            info!(input = %input, output = %output_path, "scanning");
            scan(BufReader::new(source), BufWriter::new(output))
        }
    }
}

fn scan(source: impl SourceReader, out: impl Write) -> Result<ScanSummary, Error> {
    let mut scanner = Scanner::new(source);
    let summary = write_token_table(&mut scanner, out)?;

    info!(tokens = summary.tokens, errors = summary.errors.len(), "done");
    Ok(summary)
}

fn open_failed(path: &str, e: io::Error) -> Error {
    Error::unpositioned(ErrorImpl::OpenFile {
        path: path.to_string(),
        message: e.to_string(),
    })
}
