//! Prism CLI - pick assessment questions from reporting frameworks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prism_core::export::write_json;
use prism_core::{
    parse_num_questions, ErrorBody, FrameworkCatalog, QuestionSelector, SelectionRequest,
    SelectionResponse, SelectionResult, DEFAULT_CATALOG_PATH,
};

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Select assessment questions from sustainability reporting frameworks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Framework catalog (JSON file or directory of JSON files)
    #[arg(short, long, global = true, env = "PRISM_DATA", default_value = DEFAULT_CATALOG_PATH)]
    data: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available frameworks
    List {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show details of one framework
    Info {
        /// Framework id
        id: String,
    },

    /// Generate a random question set
    Generate {
        /// Framework id (repeat for several frameworks)
        #[arg(short, long = "framework", required = true)]
        frameworks: Vec<String>,

        /// Comma-separated focus areas, e.g. "climate, water, diversity"
        #[arg(long, default_value = "")]
        focus: String,

        /// Questions per framework
        #[arg(short = 'n', long, default_value = "3")]
        count: String,

        /// Seed for reproducible selections
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Also save the JSON response to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer a JSON selection request ({"frameworkId", "focusAreas", "numQuestions"})
    Request {
        /// Request file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Seed for reproducible selections
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr keeps JSON output on stdout clean)
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List { format } => {
            let catalog = FrameworkCatalog::load(&cli.data)?;
            run_list(&catalog, &format)?;
        }

        Commands::Info { id } => {
            let catalog = FrameworkCatalog::load(&cli.data)?;
            run_info(&catalog, &id);
        }

        Commands::Generate {
            frameworks,
            focus,
            count,
            seed,
            format,
            output,
        } => {
            let catalog = FrameworkCatalog::load(&cli.data)?;
            let count = parse_num_questions(&count);
            run_generate(&catalog, &frameworks, &focus, count, seed, &format, output.as_deref())?;
        }

        Commands::Request { input, seed } => {
            run_request(&cli.data, input.as_deref(), seed)?;
        }
    }

    Ok(())
}

fn run_list(catalog: &FrameworkCatalog, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&catalog.summaries())?);
        return Ok(());
    }

    println!("\n=== Frameworks ({}) ===\n", catalog.len());
    for framework in catalog.iter() {
        println!(
            "{}  {} ({} questions)",
            framework.id.dimmed(),
            framework.name.bold(),
            framework.candidate_questions().len()
        );
    }
    println!();
    Ok(())
}

fn run_info(catalog: &FrameworkCatalog, id: &str) {
    let Some(framework) = catalog.get(id) else {
        println!("{}", "Framework data not found!".red());
        return;
    };

    println!("\n=== Selected Framework ===\n");
    println!("{}", framework.name.bold());
    if let Some(ref description) = framework.description {
        println!("{}", description);
    }
    if let Some(ref logo) = framework.logo_url {
        println!("Logo: {}", logo);
    }
    println!("Basic questions:    {}", framework.basic_questions().len());
    println!("Detailed questions: {}", framework.detailed_questions().len());
    println!("Menu entries:       {}", framework.questions_menu().len());
}

fn run_generate(
    catalog: &FrameworkCatalog,
    framework_ids: &[String],
    focus: &str,
    count: usize,
    seed: Option<u64>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let selector = QuestionSelector::new(catalog);
    let outcomes = selector.select_many(framework_ids, focus, count, seed);
    let failed = outcomes.iter().filter(|o| o.is_err()).count();

    let responses: Vec<SelectionResponse> = outcomes
        .into_iter()
        .map(|outcome| SelectionResponse::from_outcome(outcome, catalog))
        .collect();

    if format == "json" {
        print_json(&responses)?;
    } else {
        for response in &responses {
            print_response(response);
        }
    }

    if let Some(path) = output {
        if responses.len() == 1 {
            write_json(path, &responses[0])?;
        } else {
            write_json(path, &responses)?;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} selections failed", failed, responses.len());
    }
    Ok(())
}

fn run_request(data: &Path, input: Option<&Path>, seed: Option<u64>) -> Result<()> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let response = match answer_request(data, &raw, seed) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error generating questions: {:#}", e);
            SelectionResponse::failure(ErrorBody::internal(&e))
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

fn answer_request(data: &Path, raw: &str, seed: Option<u64>) -> Result<SelectionResponse> {
    let request: SelectionRequest =
        serde_json::from_str(raw).context("Failed to parse selection request")?;
    let catalog = FrameworkCatalog::load(data)?;
    let selector = QuestionSelector::new(&catalog);

    let outcome = match seed {
        Some(seed) => selector.select(&request, &mut StdRng::seed_from_u64(seed)),
        None => selector.select(&request, &mut rand::thread_rng()),
    };
    Ok(SelectionResponse::from_outcome(outcome, &catalog))
}

fn print_json<T: serde::Serialize>(responses: &[T]) -> Result<()> {
    if let [single] = responses {
        println!("{}", serde_json::to_string_pretty(single)?);
    } else {
        println!("{}", serde_json::to_string_pretty(responses)?);
    }
    Ok(())
}

fn print_response(response: &SelectionResponse) {
    if let Some(ref failure) = response.failure {
        println!("\n{} {}", "Error:".red().bold(), failure.error);
        if let Some(ref available) = failure.available_frameworks {
            let ids: Vec<&str> = available.iter().map(|s| s.id.as_str()).collect();
            println!("Available frameworks: {}", ids.join(", "));
        }
        return;
    }
    if let Some(ref result) = response.result {
        print_result(result);
    }
}

fn print_result(result: &SelectionResult) {
    println!(
        "\n=== {} questions from {} ({} in pool) ===\n",
        result.selected_count,
        result.framework.name.bold(),
        result.total_questions
    );
    for (i, q) in result.questions.iter().enumerate() {
        println!("{}. {}", i + 1, q.display_text());
        if let Some(ref category) = q.category {
            println!("   Category: {}", category.dimmed());
        }
        if !q.tags().is_empty() {
            println!("   Tags: {}", q.tags().join(", ").blue());
        }
    }
    println!();
}
