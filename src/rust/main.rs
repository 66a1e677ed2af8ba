use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use symptom_check::{
    init_logger, ArtifactManager, ArtifactPaths, ArtifactStore, Diagnosis, DiagnosisError, RuntimeConfig,
    SymptomChecker,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the classifier, label decoder and reference tables
    /// (defaults to $SYMPTOM_CHECK_MODEL_DIR, then ./model)
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    /// Intra-op threads for ONNX classifiers (0 lets the runtime decide)
    #[arg(long, global = true, default_value_t = 0)]
    intra_threads: usize,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the symptoms the classifier knows, in feature order
    Symptoms,
    /// Predict from a selection of known symptom names
    Select {
        /// Symptom names exactly as listed by `symptoms`
        symptoms: Vec<String>,
    },
    /// Predict from a free-text description; reads stdin line by line when no text is given
    Ask {
        text: Option<String>,
    },
    /// Download the artifact bundle published at a URL into the model directory
    Fetch {
        #[arg(long)]
        base_url: String,
        /// Force a fresh download of every file
        #[arg(short, long)]
        fresh: bool,
    },
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let model_dir = args.model_dir.clone().unwrap_or_else(ArtifactPaths::default_model_dir);

    match &args.command {
        Command::Fetch { base_url, fresh } => fetch(model_dir, base_url, *fresh)?,
        Command::Symptoms => {
            let store = load_store(&model_dir, args.intra_threads)?;
            for name in store.feature_schema().names() {
                println!("{}", name);
            }
        }
        Command::Select { symptoms } => {
            let store = load_store(&model_dir, args.intra_threads)?;
            let checker = SymptomChecker::new(&store);
            report(checker.diagnose_selection(symptoms), args.json, "Please select at least one symptom.")?;
        }
        Command::Ask { text } => {
            let store = load_store(&model_dir, args.intra_threads)?;
            let checker = SymptomChecker::new(&store);
            match text {
                Some(text) => report(checker.diagnose_text(text), args.json, "Please enter your symptoms!")?,
                None => {
                    for line in io::stdin().lock().lines() {
                        let line = line.context("Failed to read from stdin")?;
                        report(checker.diagnose_text(&line), args.json, "Please enter your symptoms!")?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_store(model_dir: &Path, intra_threads: usize) -> Result<ArtifactStore> {
    ArtifactStore::builder()
        .with_model_dir(model_dir)
        .with_runtime_config(RuntimeConfig::default().with_intra_threads(intra_threads))
        .build()
        .with_context(|| format!("Failed to load artifacts from {}", model_dir.display()))
}

#[tokio::main]
async fn fetch(model_dir: PathBuf, base_url: &str, fresh: bool) -> Result<()> {
    let manager = ArtifactManager::new(&model_dir)
        .with_context(|| format!("Failed to create model directory {}", model_dir.display()))?;

    if fresh {
        info!("Fresh download requested - removing any existing artifacts...");
        if let Some(manifest) = manager.local_manifest()? {
            manager.remove_download(&manifest)?;
        }
    }

    let manifest = manager.fetch(base_url, fresh).await?;
    println!("Fetched {} artifact(s) into {}", manifest.files.len(), model_dir.display());
    Ok(())
}

fn report(result: Result<Diagnosis, DiagnosisError>, json: bool, empty_warning: &str) -> Result<()> {
    match result {
        Ok(diagnosis) if json => println!("{}", serde_json::to_string_pretty(&diagnosis)?),
        Ok(diagnosis) => {
            println!("Predicted Disease: {}", diagnosis.disease);
            println!("Description: {}", diagnosis.description);
            println!("Precautions: {}", diagnosis.precautions);
            if !diagnosis.matched_symptoms.is_empty() {
                println!("Matched symptoms: {}", diagnosis.matched_symptoms.join(", "));
            }
        }
        Err(DiagnosisError::EmptyInput) => eprintln!("Warning: {}", empty_warning),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
