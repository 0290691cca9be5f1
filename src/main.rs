use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use specreport::{Result, diagnostics, log, render, results::ResultCollector};
use std::io::Write;

#[derive(Parser)]
#[command(name = "specreport")]
#[command(about = "Merge repeated spec executions into one report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from a run log.
    Report {
        #[arg(long)]
        log: String,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write to a file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report { log, format, out } => {
            // 1) Parse run log.
            let runs = log::parse_log_file(&log)?;

            // 2) Fold every observation into the canonical tree.
            let mut results = ResultCollector::new();
            for run in &runs {
                results.update(run);
            }
            for conflict in results.name_conflicts() {
                diagnostics::warn(format!(
                    "spec {} {} was also reported as '{}'; keeping '{}'",
                    conflict.root, conflict.path, conflict.ignored, conflict.kept
                ));
            }

            // 3) Render.
            let report = match format {
                Format::Text => render::render_text_report(&results)?,
                Format::Json => render::render_json_report(&results)?,
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, report).with_context(|| format!("write {}", out))?;
                    println!("Wrote {}", out);
                }
                None => std::io::stdout().write_all(report.as_bytes())?,
            }
        }
    }

    Ok(())
}
