use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use itermean::core::{Mean, TraceFormat};
use itermean::means::{Agm, ClocksAtSea, ExtendedAgm, Geothdian};
use itermean::tasks::{ComputeMean, MeanReport};
use itermean::ui::cli::drivers::InquireDriver;
use itermean::ui::cli::wizard::prompt_choice;
use itermean::ui::types::build::load_choice;
use itermean::ui::types::choices::{MeanChoice, UIChoice};
use itermean::utils::datasets::signed_dataset;
use itermean::utils::parsing::format_number_list;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Iterative means of real datasets.
#[derive(Parser, Debug)]
#[command(name = "itermean")]
#[command(about = "AGM, Geothdian, Clocks-at-Sea and Extended AGM by iterative convergence", long_about = None)]
struct Args {
    /// -v for debug logs, -vv for every step
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the reference values (default)
    Demo {
        /// Seed of the signed dataset averaged by the Extended AGM
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },

    /// Compute the mean described by a JSON configuration file
    Run {
        config: PathBuf,

        /// Write the convergence trace here (.csv, .tsv or .json)
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Print the JSON schema of configuration files
    Schema,

    /// Choose a mean and its parameters interactively
    Wizard,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command.unwrap_or(Commands::Demo { seed: 7 }) {
        Commands::Demo { seed } => demo(seed),
        Commands::Run { config, trace } => {
            let choice = load_choice(&config)
                .with_context(|| format!("reading {}", config.display()))?;
            let report = compute(choice, trace.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&MeanChoice::schema())?);
            Ok(())
        }
        Commands::Wizard => {
            let choice: MeanChoice = prompt_choice(&InquireDriver)?;
            println!("{}", serde_json::to_string_pretty(&choice)?);
            let report = compute(choice, None)?;
            println!("{report}");
            Ok(())
        }
    }
}

fn compute(choice: MeanChoice, trace_path: Option<&Path>) -> Result<MeanReport> {
    let mut task = ComputeMean::new(choice)?;
    if let Some(path) = trace_path {
        task = task.with_trace(path, trace_format(path)?);
    }
    let report = task.run()?;
    Ok(report)
}

fn trace_format(path: &Path) -> Result<TraceFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(TraceFormat::Csv),
        Some("tsv") => Ok(TraceFormat::Tsv),
        Some("json") => Ok(TraceFormat::Json),
        _ => bail!("unknown trace format for {}", path.display()),
    }
}

fn demo(seed: u64) -> Result<()> {
    let data = vec![1.1, 0.2, 0.3, 1.0];
    println!("Dataset: {}", format_number_list(&data));

    let mut clocks = ClocksAtSea::new(data.clone())?;
    let mut agm = Agm::new(data.clone())?;
    let mut gmdn = Geothdian::new(data)?;

    println!("Clocks at Sea Mean: {:.12}", clocks.calculate()?);
    println!("AGM: {:.12}", agm.calculate()?);
    println!("Geothdian: {:.12}", gmdn.calculate()?);
    println!("Clocks at Sea Iterations: {}", clocks.iterations());

    let mut xkcd = Geothdian::new(vec![1.0, 1.0, 2.0, 3.0, 5.0])?;
    println!("Geothdian of 1, 1, 2, 3, 5: {:.12}", xkcd.calculate()?);

    let signed = signed_dataset(seed, 8, 10.0);
    let mut ext = ExtendedAgm::new(signed)?;
    let value = ext.calculate()?;
    println!("Signed dataset: {}", format_number_list(ext.data()));
    println!(
        "Extended AGM: {:.12} (positive {:.12}, negative {:.12})",
        value,
        ext.positive_mean(),
        ext.negative_mean()
    );
    Ok(())
}
