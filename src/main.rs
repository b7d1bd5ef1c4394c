//! mlsim - Main entry point
//!
//! CLI for the training/prediction/evaluation pipeline.

use clap::Parser;
use mlsim::cli::{cmd_evaluate, cmd_predict, cmd_train, Cli, Commands};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mlsim=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train { model, data, out, max_depth, min_samples_split } => {
            cmd_train(&model, &data, &out, max_depth, min_samples_split)
        }
        Commands::Predict { model, data, out } => cmd_predict(&model, &data, &out),
        Commands::Evaluate { predictions, actuals, out } => {
            cmd_evaluate(&predictions, &actuals, out.as_deref())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
