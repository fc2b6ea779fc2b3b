use tracing::{debug, error, info, warn};

use crate::cli::{program_name, program_registry, usage, TokenResolver};
use crate::client::Fetcher;
use crate::config::Config;
use crate::context::Environment;
use crate::errors::IcdError;
use crate::job::Job;
use crate::logging;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Resolves arguments, sets up logging and configuration, and drives the
/// update job on a tokio runtime.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    env.program_name = program_name(args.first().map(String::as_str));

    let registry = program_registry();
    let resolved = TokenResolver::new(&registry).resolve(&args);

    if resolved.found("help") {
        println!("{}", usage(&env.program_name));
        return ExitStatus::Success;
    }

    let quiet = resolved.found("quiet");
    logging::init(quiet, resolved.found("verbose"));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Config::default()
        }
    };

    let job = Job::from_args(&resolved, &config);
    debug!(dest = %job.dest.display(), year = ?job.year, "Resolved job");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ExitStatus::Error;
        }
    };

    match runtime.block_on(program(job, config, env.show_progress(quiet))) {
        Ok(status) => status,
        Err(e) => handle_error(e),
    }
}

pub async fn program(mut job: Job, config: Config, show_progress: bool) -> Result<ExitStatus, IcdError> {
    let fetcher = Fetcher::new(&config)?;
    let written = job.work(&fetcher, &config, show_progress).await?;
    info!(files = written.len(), dest = %job.dest.display(), "Done");
    Ok(ExitStatus::Success)
}

fn handle_error(error: IcdError) -> ExitStatus {
    let status = ExitStatus::from(&error);
    match error {
        IcdError::Interrupted => warn!("{}", error),
        _ => error!("{}", error),
    }
    status
}
