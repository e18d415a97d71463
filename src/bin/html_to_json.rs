use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use monster_stats::{extract, init_tracing, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "html_to_json",
    about = "Extract monster stat blocks from HTML (Markdown fallback) into a JSON array"
)]
struct Cli {
    /// Settings file (default: monster_stats.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory of HTML stat blocks
    #[arg(long)]
    html_dir: Option<PathBuf>,
    /// Directory of Markdown stat blocks used as fallback
    #[arg(long)]
    md_dir: Option<PathBuf>,
    /// JSON output file
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Only read the top level of each input directory
    #[arg(long)]
    flat: bool,
    /// Also process Markdown files whose HTML counterpart exists
    #[arg(long)]
    include_md_twins: bool,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(dir) = self.html_dir {
            settings.html_dir = dir;
        }
        if let Some(dir) = self.md_dir {
            settings.md_dir = dir;
        }
        if let Some(out) = self.out {
            settings.out_file = out;
        }
        if self.flat {
            settings.recursive = false;
        }
        if self.include_md_twins {
            settings.skip_md_with_html_twin = false;
        }
        settings
    }
}

fn progress_bar() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let settings = cli.apply(settings);
    tracing::debug!(?settings, "settings loaded");

    let pb = progress_bar()?;
    let summary = extract::run(&settings, &pb)?;
    pb.finish_and_clear();

    println!(
        "Wrote {} records -> {} ({} of {} documents skipped)",
        summary.records,
        settings.out_file.display(),
        summary.skipped,
        summary.documents
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}
