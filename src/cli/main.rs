use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use insuremate::{
    config::Config,
    ml::ModelLoader,
    models::{City, FormOptions, Occupation, PredictionForm},
    prediction::PredictionHandler,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use validator::Validate;

#[derive(Parser)]
#[command(name = "insuremate-cli")]
#[command(about = "InsureMate premium category CLI", long_about = None)]
struct Cli {
    /// Model artifact to load (defaults to the configured path)
    #[arg(short, long, env = "INSUREMATE_MODEL")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the premium category for one person
    Predict {
        #[command(flatten)]
        input: PredictArgs,

        /// Send the request to a running server instead of loading the model locally
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Show the artifact's metadata
    Inspect {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List the accepted cities and occupations
    Options,
}

#[derive(Args)]
struct PredictArgs {
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=120))]
    age: u32,

    /// Weight in kilograms
    #[arg(long, default_value_t = 70.0)]
    weight: f64,

    /// Height in meters
    #[arg(long, default_value_t = 1.7)]
    height: f64,

    /// Annual income in lakhs per annum
    #[arg(long, default_value_t = 5.0)]
    income_lpa: f64,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    smoker: bool,

    #[arg(long, default_value = "Delhi")]
    city: City,

    #[arg(long, default_value = "retired")]
    occupation: Occupation,
}

impl From<PredictArgs> for PredictionForm {
    fn from(args: PredictArgs) -> Self {
        Self {
            age: args.age,
            weight: args.weight,
            height: args.height,
            income_lpa: args.income_lpa,
            smoker: args.smoker,
            city: args.city,
            occupation: args.occupation,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

#[derive(Serialize)]
struct ModelSummary<'a> {
    artifact: String,
    metadata: &'a insuremate::ml::ArtifactMetadata,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insuremate=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let artifact_path = match cli.model {
        Some(path) => path,
        None => Config::load().unwrap_or_default().model.artifact_path,
    };

    match cli.command {
        Commands::Predict { input, endpoint } => {
            let form = PredictionForm::from(input);
            if let Err(errors) = form.validate() {
                eprintln!("Validation error: {}", errors);
                return Ok(ExitCode::from(2));
            }

            match endpoint {
                Some(endpoint) => predict_remote(&endpoint, &form).await,
                None => Ok(predict_local(artifact_path, &form)),
            }
        }

        Commands::Inspect { format } => {
            let loader = ModelLoader::from_path(artifact_path);
            let Some(classifier) = loader.load_model() else {
                if let Some(err) = loader.load_error() {
                    eprintln!("{}", err);
                }
                return Ok(ExitCode::FAILURE);
            };

            let summary = ModelSummary {
                artifact: loader.location(),
                metadata: classifier.metadata(),
            };
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
                OutputFormat::Toml => toml::to_string_pretty(&summary)?,
            };
            println!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Options => {
            println!("{}", serde_json::to_string_pretty(&FormOptions::new())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn predict_local(artifact_path: PathBuf, form: &PredictionForm) -> ExitCode {
    let loader = Arc::new(ModelLoader::from_path(artifact_path));
    if let Some(err) = loader.load_error() {
        eprintln!("{}", err);
    }

    let outcome = PredictionHandler::new(loader).handle(form);
    if outcome.is_success() {
        println!("{}", outcome.message());
        return ExitCode::SUCCESS;
    }

    eprintln!("{}", outcome.message());
    if !outcome.hints().is_empty() {
        eprintln!("Troubleshooting:");
        for hint in outcome.hints() {
            eprintln!("  {}", hint);
        }
    }
    ExitCode::FAILURE
}

async fn predict_remote(endpoint: &str, form: &PredictionForm) -> anyhow::Result<ExitCode> {
    let response = reqwest::Client::new()
        .post(format!("{}/v1/predictions", endpoint.trim_end_matches('/')))
        .json(form)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", endpoint))?;

    let success = response.status().is_success();
    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
