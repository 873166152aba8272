use clap::{Parser, Subcommand};
use job_feed::commands;
use job_feed::config::{parse_timeout, ApiConfig, AppConfig};
use job_feed::models::{CandidatePayload, NumberOrText, VerifyPayload};
use job_feed::services::ListJobsParams;
use job_feed::utils::logging;
use job_feed::AppState;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "job-feed")]
#[command(about = "Browse job listings and submit candidates to the recruiting API")]
struct Cli {
    /// Override the upstream base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of jobs
    List {
        #[arg(short, long)]
        page: Option<u32>,

        #[arg(short, long)]
        size: Option<u32>,

        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show a single job
    Show {
        /// Upstream job id
        job_id: String,
    },

    /// Submit a candidate
    Submit {
        #[arg(long)]
        email: String,

        #[arg(long)]
        mobile: String,

        /// Dialling code, e.g. 91 or +91
        #[arg(long)]
        country_code: NumberOrText,

        /// Resume link or reference
        #[arg(long)]
        resume: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Ask upstream to verify a candidate's contact details
    Verify {
        #[arg(long)]
        email: String,

        #[arg(long)]
        mobile: String,

        #[arg(long)]
        country_code: NumberOrText,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, String> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().map_err(|e| e.to_string())?;
    if let Some(base_url) = &cli.base_url {
        config.api = ApiConfig::new(base_url, config.api.api_token.take()).map_err(|e| e.to_string())?;
    }
    if let Some(secs) = &cli.timeout_secs {
        config.request_timeout = Some(parse_timeout(secs).map_err(|e| e.to_string())?);
    }

    let _log_guard = logging::init(&config.telemetry)?;

    let state = AppState::from_config(&config).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::List { page, size, query } => {
            let params = ListJobsParams { page, size, query };
            to_json(&commands::list_jobs(&state, params).await?)
        }
        Commands::Show { job_id } => to_json(&commands::get_job(&state, &job_id).await?),
        Commands::Submit {
            email,
            mobile,
            country_code,
            resume,
            first_name,
            last_name,
        } => {
            let payload = CandidatePayload {
                first_name,
                last_name,
                resume,
                mobile,
                mobile_country_code: country_code,
                email,
            };
            to_json(&commands::submit_candidate(&state, payload).await?)
        }
        Commands::Verify {
            email,
            mobile,
            country_code,
        } => {
            let payload = VerifyPayload {
                email,
                mobile,
                mobile_country_code: country_code,
            };
            to_json(&commands::verify_candidate(&state, payload).await?)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {}", e))
}
