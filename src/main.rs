use clap::Parser;
use small_mapred::adapters::{Input, Output};
use small_mapred::config::cli::{CliConfig, JobCommand};
use small_mapred::utils::{logger, validation::Validate};
use small_mapred::{
    CatalogPipeline, JobEngine, JobError, MovieMapPipeline, TransactionPipeline,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting small-mapred");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let input = match &config.input {
        Some(path) => Input::File(path.clone()),
        None => Input::Stdin,
    };
    let output = match &config.output {
        Some(path) => Output::File(path.clone()),
        None => Output::Stdout,
    };

    let result = match config.job {
        JobCommand::TransactionsReduce => {
            JobEngine::new(TransactionPipeline::new(input, output))
                .run()
                .await
        }
        JobCommand::MoviesReduce => {
            JobEngine::new(CatalogPipeline::new(input, output))
                .run()
                .await
        }
        JobCommand::MoviesMap(args) => match args.resolve().and_then(|filter| {
            filter.validate()?;
            Ok(filter)
        }) {
            Ok(filter) => {
                JobEngine::new(MovieMapPipeline::new(input, output, filter))
                    .run()
                    .await
            }
            Err(e) => {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = result {
        tracing::error!("Job failed: {}", e);
        eprintln!("❌ {}", e);
        let exit_code = match e {
            JobError::ConfigError { .. } | JobError::ValidationError { .. } => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    tracing::info!("Job completed successfully");
}
