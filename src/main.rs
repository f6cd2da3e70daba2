use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ordo_core::config::{corpus_path_from_env_value, resolve_corpus_path};
use ordo_core::constants::CORPUS_PATH_ENV;
use ordo_core::{
    CoreConfig, Library, Prescription, PrescriptionLine, SpecialtySummary, ViewController,
    result_count_label,
};

#[derive(Parser)]
#[command(name = "ordo")]
#[command(about = "Prescription template library")]
struct Cli {
    /// Corpus YAML file (defaults to ORDO_CORPUS_PATH, then data/specialties.yaml)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List specialties with their prescription counts
    Specialties,
    /// List the prescriptions of one specialty in curated order
    List {
        /// Specialty id
        specialty: String,
    },
    /// List every prescription alphabetically
    Index,
    /// Search titles, subtitles and lines (accent- and case-insensitive)
    Search {
        /// Search term
        term: String,
        /// Start from this specialty view
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Show one prescription
    Show {
        /// Prescription id
        id: String,
    },
}

/// Entry point for the Ordo command-line renderer.
///
/// # Environment Variables
/// - `ORDO_CORPUS_PATH`: corpus YAML file (overridden by `--corpus`)
/// - `RUST_LOG`: log filter; logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ordo=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let override_path = cli
        .corpus
        .or_else(|| corpus_path_from_env_value(std::env::var(CORPUS_PATH_ENV).ok()));
    let config = CoreConfig::new(resolve_corpus_path(override_path)?)?;
    tracing::debug!(path = %config.corpus_path().display(), "using corpus");
    let library = Library::open(&config)?;
    let mut view = library.controller();

    match cli.command {
        Some(Commands::Specialties) => {
            print_summaries(&library.specialty_summaries(), cli.json)?;
        }
        Some(Commands::List { specialty }) => {
            view.select_specialty(specialty);
            print_results(&view, cli.json)?;
        }
        Some(Commands::Index) => {
            view.select_alphabetical();
            print_results(&view, cli.json)?;
        }
        Some(Commands::Search { term, specialty }) => {
            if let Some(specialty) = specialty {
                view.select_specialty(specialty);
            }
            view.set_search_term(term);
            print_results(&view, cli.json)?;
        }
        Some(Commands::Show { id }) => {
            let Some(prescription) = library.prescription_by_id(&id) else {
                anyhow::bail!("no prescription with id '{id}'");
            };
            view.select_alphabetical();
            view.select_prescription(prescription.clone());
            print_detail(&view, prescription, cli.json)?;
        }
        None => {
            println!("Use 'ordo --help' for commands");
        }
    }

    Ok(())
}

fn print_summaries(summaries: &[SpecialtySummary], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summaries)?);
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{:<14} {} ({} fiches)",
            summary.id.as_str(),
            summary.name,
            summary.prescription_count
        );
    }
    Ok(())
}

fn print_results(view: &ViewController, json: bool) -> anyhow::Result<()> {
    let results = view.results();
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{} [{}]", view.list_heading(), result_count_label(results.len()));
    if results.is_empty() {
        println!("Aucun résultat trouvé.");
        return Ok(());
    }

    for item in &results {
        let p = &item.prescription;
        println!("- {} ({})", p.title, p.id);
        if let Some(subtitle) = &p.subtitle {
            println!("    {subtitle}");
        }
        if view.shows_specialty_tags() {
            let names: Vec<&str> = item.specialty_tags.iter().map(|t| t.name.as_str()).collect();
            println!("    [{}]", names.join(", "));
        }
    }
    Ok(())
}

fn print_detail(view: &ViewController, p: &Prescription, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(p)?);
        return Ok(());
    }

    if let Some(context) = view.detail_context() {
        println!("{context}");
    }
    println!("{}", p.title);
    if let Some(subtitle) = &p.subtitle {
        println!("{subtitle}");
    }
    println!();

    for line in &p.lines {
        match line {
            PrescriptionLine::Header { text } => println!("\n{text}"),
            PrescriptionLine::Note { text } => println!("  * {text}"),
            PrescriptionLine::Instruction { text } => println!("  {text}"),
        }
    }

    if !p.notes.is_empty() {
        println!("\nNotes :");
        for note in &p.notes {
            println!("  {note}");
        }
    }
    if !p.warnings.is_empty() {
        println!("\nAttention :");
        for warning in &p.warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}
