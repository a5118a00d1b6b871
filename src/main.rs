use anyhow::Result;
use baseline_diff::commands::command::{exec_command, write_command_result};
use baseline_diff::{Baseline, BaselineOptions, CaseContext, CaseFilter, DiffFormatOptions};
use clap::{Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bline",
    version = "0.1.0",
    about = "Compare case results against approved baselines",
    long_about = "Runs every case of a cases/results/baselines fixture as a shell command, \
    writes the command output as the case result and compares it with the baseline.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "run",
        about = "Run command cases and match them against their baselines",
        long_about = "Each file case is a shell command; each directory case holds one in a `command` file. \
        Its stdout, stderr and failure become the result, which is then matched against the baseline."
    )]
    Run {
        #[arg(index = 1, help = "The fixture root")]
        base_path: PathBuf,
        #[arg(short, long, help = "Glob (prefix with ! to negate) selecting cases to run")]
        filter: Option<String>,
        #[arg(long, help = "Treat --filter as a regular expression")]
        regex: bool,
        #[arg(long, default_value = "cases")]
        cases_folder: String,
        #[arg(long, default_value = "results")]
        results_folder: String,
        #[arg(long, default_value = "baselines")]
        baselines_folder: String,
        #[arg(short, long, help = "Copy results into the baselines instead of failing")]
        accept: bool,
        #[arg(long, help = "Run all cases at once")]
        parallel: bool,
        #[arg(long, help = "Don't warn about cases excluded by the filter")]
        quiet_filter: bool,
        #[arg(long, default_value_t = 100)]
        large_file_threshold: usize,
        #[arg(long, default_value_t = 5)]
        ambient_lines: usize,
        #[arg(long, default_value_t = 150)]
        display_threshold: usize,
    },
}

async fn run_command_case(context: CaseContext, accept: bool) -> Result<()> {
    let result = exec_command(&context).await?;
    write_command_result(context.result_path(), &result).await?;

    if accept {
        context.copy_to_baseline(None).await?;
    }

    context.match_baseline(None).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_path,
            filter,
            regex,
            cases_folder,
            results_folder,
            baselines_folder,
            accept,
            parallel,
            quiet_filter,
            large_file_threshold,
            ambient_lines,
            display_threshold,
        } => {
            let mut options = BaselineOptions::from(base_path)
                .with_folders(&cases_folder, &results_folder, &baselines_folder)
                .with_parallel(parallel)
                .with_diff(DiffFormatOptions {
                    large_file_threshold,
                    large_file_ambient_lines: ambient_lines,
                    diff_display_threshold: display_threshold,
                    colorize: std::io::stdout().is_terminal(),
                });
            options.suppress_filter_warnings = quiet_filter;

            if let Some(filter) = filter {
                let filter = if regex {
                    CaseFilter::regex(&filter)?
                } else {
                    CaseFilter::parse(&filter)?
                };
                options = options.with_filter(filter);
            }

            let report = Baseline::new(options)
                .run(|context| run_command_case(context, accept))
                .await?;

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(()) => println!("{} {}", "pass".green(), outcome.name),
                    Err(e) => println!("{} {}\n{:#}\n", "fail".red(), outcome.name, e),
                }
            }

            let failed = report.failures().count();
            println!("{} cases, {} failed", report.outcomes.len(), failed);

            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
