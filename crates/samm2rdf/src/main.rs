use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::Level;

use samm2rdf::config::{load_settings, EditorSettings};
use samm2rdf::store::loader::load_file_with_version;
use samm2rdf::{
    instantiate_file, serialize_model, ElementGraph, LoadedFilesService, ModelSynchronizer,
    NamespaceFile, SyncReport, SyncScheduler,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Rebuild the store from the instantiated elements, then serialize.
    Sync,
    /// Serialize the store as loaded.
    Format,
}

/// Synchronize SAMM aspect models and write canonical Turtle.
#[derive(Parser)]
#[command(name = "samm2rdf", version, about)]
struct Cli {
    /// Turtle files; the first is the file being edited, the rest are shared files it references.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// What to do with the current file.
    #[arg(long, value_enum, default_value = "sync")]
    mode: Mode,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Display language for example values (overrides the settings file).
    #[arg(long, value_name = "TAG")]
    language: Option<String>,

    /// Editor settings JSON file.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Fail if the current file is not canonically formatted.
    #[arg(long)]
    check: bool,

    /// Print the synchronization report as JSON to stderr.
    #[arg(long)]
    stats: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => EditorSettings::default(),
    };
    if cli.language.is_some() {
        settings.language = cli.language.clone();
    }

    // Load every input; the first one is rendered
    let mut registry = LoadedFilesService::new();
    let mut names = Vec::with_capacity(cli.inputs.len());
    for (index, path) in cli.inputs.iter().enumerate() {
        let mut model = load_file_with_version(path, &settings.samm_version)?;
        if index == 0 {
            model.set_samm_alias(&settings.samm_alias);
        }
        let file = NamespaceFile::from_model(&file_name(path), model).rendered(index == 0);
        names.push(registry.add_file(file, false).absolute_name());
    }
    let current = names[0].clone();

    let mut report = None;
    if cli.mode == Mode::Sync {
        let mut graph = ElementGraph::new();
        // Shared files first, so the current file's references resolve to them
        for name in names.iter().skip(1).chain(std::iter::once(&current)) {
            let instantiated = instantiate_file(&mut graph, &mut registry, name)?;
            for urn in &instantiated.dangling {
                tracing::warn!("{name}: unresolved reference {urn}");
            }
        }

        let synchronizer = ModelSynchronizer::new();
        let completed: RefCell<Option<SyncReport>> = RefCell::new(None);
        let mut scheduler = SyncScheduler::new();
        scheduler.request(|outcome| {
            if let Ok(sync_report) = outcome {
                *completed.borrow_mut() = Some(sync_report.clone());
            }
        });
        if let Some(outcome) = scheduler.run_pending(&synchronizer, &graph, &mut registry) {
            outcome?;
        }
        drop(scheduler);
        report = completed.into_inner();
    }

    let file = registry
        .get_file(&current)
        .ok_or_else(|| format!("{current} is not loaded"))?;
    let model = file
        .rdf_model
        .as_ref()
        .ok_or_else(|| format!("{current} has no RDF model"))?;
    let text = serialize_model(model, &settings.serializer_options());
    if text.is_empty() {
        return Err(format!("could not serialize {current}").into());
    }

    if cli.stats {
        if let Some(report) = &report {
            eprintln!("{}", serde_json::to_string_pretty(report)?);
        }
    }

    if cli.check {
        let original = std::fs::read_to_string(&cli.inputs[0])?;
        if original != text {
            return Err(format!("{} is not canonically formatted", cli.inputs[0].display()).into());
        }
    } else {
        let mut output_writer: Box<dyn Write> = match &cli.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        output_writer.write_all(text.as_bytes())?;
        output_writer.flush()?;
    }

    // Print summary to stderr (unless quiet)
    if !cli.quiet {
        eprintln!(
            "Wrote {} triples for {current} ({} files loaded)",
            model.store().len(),
            registry.len()
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
