use std::path::PathBuf;

use clap::Parser;
use monster_stats::init_tracing;
use monster_stats::tabulate::{default_output, json_to_csv, TabulateOptions};

/// Convert a list-of-objects JSON file to CSV.
#[derive(Parser, Debug)]
#[command(name = "json_to_csv")]
struct Cli {
    /// JSON file holding a top-level array of objects
    input: PathBuf,
    /// CSV destination (default: input path with a .csv extension)
    output: Option<PathBuf>,
    /// Leave blank or missing gear cells as they are
    #[arg(long)]
    raw_gear: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
    let opts = TabulateOptions {
        normalize_gear: !cli.raw_gear,
    };
    let rows = json_to_csv(&cli.input, &output, opts)?;
    println!("Wrote {} rows to {}", rows, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_or_two_positionals() {
        let cli = Cli::try_parse_from(["json_to_csv", "m.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("m.json"));
        assert!(cli.output.is_none());
        assert!(!cli.raw_gear);

        let cli = Cli::try_parse_from(["json_to_csv", "m.json", "out.csv", "--raw-gear"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert!(cli.raw_gear);
    }

    #[test]
    fn wrong_arity_is_a_usage_error() {
        let none = Cli::try_parse_from(["json_to_csv"]).unwrap_err();
        assert_eq!(none.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_ne!(none.exit_code(), 0);
        assert!(none.to_string().contains("Usage:"));

        let many = Cli::try_parse_from(["json_to_csv", "a.json", "b.csv", "c.csv"]).unwrap_err();
        assert_ne!(many.exit_code(), 0);
    }
}
