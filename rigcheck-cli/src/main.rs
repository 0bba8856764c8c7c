//! rigcheck CLI - PC build compatibility checks and profile scoring from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use rigcheck::catalog::CatalogSource;
use rigcheck::scoring::load_profiles;
use rigcheck::{
    match_power, BuildReport, CandidateRanker, CatalogMemo, Category, CheckOptions, FileCatalog,
    HttpCatalog, PinSet, PowerMatch, ProfileScore, RankedCandidate, RemarkScore, Remarks,
    RigCheckCore, ScoringEngine,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rigcheck")]
#[command(about = "PC build compatibility checker and profile scorer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every part of a build against the others
    Check {
        /// Path to a build JSON file
        #[arg(value_name = "BUILD")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if remarks at this verdict or worse are found
        #[arg(long, value_enum)]
        fail_on: Option<FailOn>,

        /// Directory of user profile JSON files
        #[arg(long, value_name = "DIR")]
        profiles: Option<PathBuf>,

        /// Treat `ok` remarks as failures
        #[arg(long)]
        strict: bool,
    },

    /// Score a build against the usage profiles
    Evaluate {
        /// Path to a build JSON file
        #[arg(value_name = "BUILD")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Directory of user profile JSON files
        #[arg(long, value_name = "DIR")]
        profiles: Option<PathBuf>,
    },

    /// Rank catalog candidates for one slot of a build
    Rank {
        /// Category to rank (cpu, mobo, ram, gpu, psu, mem, chassis)
        #[arg(value_name = "CATEGORY")]
        category: Category,

        /// Path to a build JSON file
        #[arg(long, value_name = "BUILD")]
        build: Option<PathBuf>,

        /// Directory holding <category>.json catalog files
        #[arg(long, value_name = "DIR", conflicts_with = "catalog_url")]
        catalog_dir: Option<PathBuf>,

        /// Base URL of the catalog API
        #[arg(long, value_name = "URL")]
        catalog_url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Match PSU PCIe connectors against graphics card requirements
    Power {
        /// Offered pin counts, e.g. 8,8,6 (`?` when unknown)
        #[arg(long, value_name = "PINS", allow_hyphen_values = true)]
        available: String,

        /// Required pin counts, e.g. 8,8 (`?` when unknown)
        #[arg(long, value_name = "PINS", allow_hyphen_values = true)]
        required: String,
    },

    /// List available scoring profiles
    Profiles {
        /// Show profile rules
        #[arg(short, long)]
        verbose: bool,

        /// Directory of user profile JSON files
        #[arg(long, value_name = "DIR")]
        profiles: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

#[derive(Clone, ValueEnum)]
enum FailOn {
    Bad,
    Ok,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check {
            file,
            format,
            fail_on,
            profiles,
            strict,
        } => handle_check(&file, format, fail_on, profiles, strict),
        Commands::Evaluate {
            file,
            format,
            profiles,
        } => handle_evaluate(&file, format, profiles.as_deref()),
        Commands::Rank {
            category,
            build,
            catalog_dir,
            catalog_url,
            format,
        } => handle_rank(category, build.as_deref(), catalog_dir, catalog_url, format).await,
        Commands::Power {
            available,
            required,
        } => handle_power(&available, &required),
        Commands::Profiles { verbose, profiles } => {
            handle_profiles(verbose, profiles.as_deref());
            0
        }
    };

    process::exit(exit_code);
}

fn handle_check(
    file: &Path,
    format: OutputFormat,
    fail_on: Option<FailOn>,
    profiles_dir: Option<PathBuf>,
    strict: bool,
) -> i32 {
    let options = CheckOptions {
        strict_mode: strict,
        profiles_dir,
        categories: vec![],
    };

    match RigCheckCore::check_file(file, &options) {
        Ok(report) => {
            match format {
                OutputFormat::Human => output_report_human(&report),
                OutputFormat::Json => print_json(&report),
            }
            if should_fail(&report, fail_on.as_ref()) {
                return 1;
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn should_fail(report: &BuildReport, fail_on: Option<&FailOn>) -> bool {
    match fail_on {
        Some(FailOn::Bad) => report.has_bad(),
        Some(FailOn::Ok) => report.has_ok_or_bad(),
        None => report.strict_mode && !report.passes(),
    }
}

fn handle_evaluate(file: &Path, format: OutputFormat, profiles_dir: Option<&Path>) -> i32 {
    let build = match RigCheckCore::load_build(file) {
        Ok(build) => build,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let engine = ScoringEngine::with_profiles(load_profiles(profiles_dir));
    let scores = engine.evaluate(&build);
    match format {
        OutputFormat::Human => output_scores_human(&scores),
        OutputFormat::Json => print_json(&scores),
    }
    0
}

async fn handle_rank(
    category: Category,
    build_file: Option<&Path>,
    catalog_dir: Option<PathBuf>,
    catalog_url: Option<String>,
    format: OutputFormat,
) -> i32 {
    let build = match build_file.map(RigCheckCore::load_build).transpose() {
        Ok(build) => build.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let source: Box<dyn CatalogSource> = match (catalog_dir, catalog_url) {
        (Some(dir), _) => Box::new(FileCatalog::new(dir)),
        (None, Some(url)) => Box::new(HttpCatalog::with_base_url(url)),
        (None, None) => {
            eprintln!("Error: one of --catalog-dir or --catalog-url is required");
            return 1;
        }
    };

    let ranker = CandidateRanker::new(source);
    let mut memo = CatalogMemo::new();
    match ranker.rank_page(category, &build, &mut memo).await {
        Ok(ranked) => {
            match format {
                OutputFormat::Human => output_ranking_human(category, &ranked),
                OutputFormat::Json => print_json(&ranked),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_power(available: &str, required: &str) -> i32 {
    let (available, required) = match (parse_pins(available), parse_pins(required)) {
        (Ok(available), Ok(required)) => (available, required),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let result = match_power(&available, &required);
    let verdict = match result {
        PowerMatch::Satisfied => "satisfied",
        PowerMatch::Unsatisfied => "unsatisfied",
        PowerMatch::Undetermined => "undetermined",
    };
    println!("{} (available: {}, required: {})", verdict, available, required);
    0
}

/// `8,8,6` into known pins, `?` into unknown, empty into no connectors.
fn parse_pins(text: &str) -> Result<PinSet, String> {
    let text = text.trim();
    if text == "?" {
        return Ok(PinSet::Unknown);
    }
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| format!("invalid pin count '{}'", part))
        })
        .collect::<Result<Vec<u32>, String>>()
        .map(PinSet::Known)
}

fn handle_profiles(verbose: bool, profiles_dir: Option<&Path>) {
    println!("Available scoring profiles:\n");

    for profile in load_profiles(profiles_dir) {
        println!("  {}", profile.id);
        println!("    {}", profile.name);
        if verbose {
            if !profile.description.is_empty() {
                println!("    {}", profile.description);
            }
            for rule in &profile.rules {
                let state = if rule.enabled { "" } else { " (disabled)" };
                println!("      - {}: {}{}", rule.id, rule.name, state);
            }
        }
        println!();
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn verdict_label(score: RemarkScore) -> &'static str {
    match score {
        RemarkScore::Good => "GOOD",
        RemarkScore::Ok => "OK",
        RemarkScore::Bad => "BAD",
        RemarkScore::Unknown => "UNKNOWN",
    }
}

fn output_remarks(remarks: &Remarks, indent: &str) {
    for (key, remark) in remarks {
        println!("{}[{}] {}: {}", indent, verdict_label(remark.score), key, remark.text);
    }
}

fn output_report_human(report: &BuildReport) {
    if let Some(source) = &report.source {
        println!("\nBuild: {}", source.display());
    }
    println!("{}", "─".repeat(60));

    if report.components.is_empty() {
        println!("  No components selected");
    }
    for component in &report.components {
        println!("\n  {} - {}", component.category.label(), component.name);
        if component.remarks.is_empty() {
            println!("    Nothing to compare against");
        }
        output_remarks(&component.remarks, "    ");
    }

    println!("\n  Profiles:");
    for score in &report.profiles {
        println!("    {:<28} {:>5}", score.name, score.total_score);
    }

    println!("\n  Summary:");
    println!("    Good:    {}", report.stats.good);
    println!("    Ok:      {}", report.stats.ok);
    println!("    Bad:     {}", report.stats.bad);
    println!("    Unknown: {}", report.stats.unknown);
}

fn output_scores_human(scores: &[ProfileScore]) {
    for score in scores {
        println!("\n{} ({})", score.name, score.total_score);
        for feedback in &score.feedback {
            println!("  - {}", feedback);
        }
    }
}

fn output_ranking_human(category: Category, ranked: &[RankedCandidate]) {
    println!("\nCandidates for {}:", category.label());
    if ranked.is_empty() {
        println!("  No candidates");
    }
    for candidate in ranked {
        let price = candidate
            .component
            .price()
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>3}. [{:+}] {} ({})",
            candidate.position + 1,
            candidate.score,
            candidate.component.name(),
            price
        );
        output_remarks(&candidate.remarks, "         ");
    }
}
