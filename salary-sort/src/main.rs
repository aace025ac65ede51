use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{command, Parser};
use salary_sort::roster::RecordSource;

const DEFAULT_EMPLOYEE_COUNT: usize = 5;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    // prompts only make sense when someone is typing the records in
    let prompt: Box<dyn Write> = if args.quiet || args.input.is_some() {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let mut source = RecordSource::with_prompts(reader, prompt);
    salary_sort::sort_roster(&mut source, args.count, &mut io::stdout())
}

/// Reads employee records (name and salary) and prints them before and after
/// sorting by descending salary.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of employees to read
    #[arg(short = 'n', long, default_value_t = DEFAULT_EMPLOYEE_COUNT)]
    count: usize,
    /// Read records from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Don't prompt for each name and salary
    #[arg(short, long)]
    quiet: bool,
}
