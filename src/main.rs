//! `topsis` command-line driver.
//!
//! ```text
//! topsis <InputFile> <Weights> <Impacts> <ResultFile> [RecipientEmail]
//! topsis data.csv "1,1,1,2" "+,+,-,+" result.csv
//! ```
//!
//! Exit codes: 0 on success, 1 on usage or input errors, 2 when the result
//! was written but could not be delivered.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use topsis_engine::adapters::{CsvResultSink, CsvTableSource, OutboxDeliveryChannel};
use topsis_engine::application::{DeliveryOutcome, RankTableCommand, RankTableHandler};
use topsis_engine::config::{AppConfig, LoggingConfig};
use topsis_engine::domain::foundation::EmailAddress;
use topsis_engine::domain::topsis::TopsisEngine;

const USAGE: &str =
    "Usage: topsis <InputFile> <Weights> <Impacts> <ResultFile> [RecipientEmail]";

const EXIT_FAILURE: u8 = 1;
const EXIT_DELIVERY_FAILED: u8 = 2;

/// Positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    input: String,
    weights: String,
    impacts: String,
    result: String,
    recipient: Option<String>,
}

impl CliArgs {
    /// Parses everything after the program name; `None` on a wrong count.
    fn parse(args: &[String]) -> Option<Self> {
        match args {
            [input, weights, impacts, result] => Some(Self {
                input: input.clone(),
                weights: weights.clone(),
                impacts: impacts.clone(),
                result: result.clone(),
                recipient: None,
            }),
            [input, weights, impacts, result, recipient] => Some(Self {
                input: input.clone(),
                weights: weights.clone(),
                impacts: impacts.clone(),
                result: result.clone(),
                recipient: Some(recipient.clone()),
            }),
            _ => None,
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", message);
    ExitCode::from(EXIT_FAILURE)
}

#[tokio::main]
async fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = CliArgs::parse(&raw) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(EXIT_FAILURE);
    };

    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(err) => return fail(err),
    };
    init_tracing(&config.logging);

    let recipient = match args.recipient.as_deref().map(EmailAddress::parse).transpose() {
        Ok(recipient) => recipient,
        Err(err) => return fail(err),
    };

    let mut handler = RankTableHandler::new(
        Arc::new(CsvTableSource::from_path(&args.input)),
        Arc::new(CsvResultSink::new(&args.result)),
    )
    .with_engine(TopsisEngine::new(config.output.tie_policy))
    .with_columns(config.output.columns());

    if config.delivery.enabled {
        let mut channel = OutboxDeliveryChannel::new(&config.delivery.outbox_dir);
        match config.delivery.sender() {
            Ok(Some(sender)) => channel = channel.with_sender(sender),
            Ok(None) => {}
            Err(err) => return fail(err),
        }
        handler = handler.with_delivery(Arc::new(channel), config.delivery.template());
    }

    let cmd = RankTableCommand {
        weights: args.weights,
        impacts: args.impacts,
        recipient,
    };

    let outcome = match handler.handle(cmd).await {
        Ok(outcome) => outcome,
        Err(err) => return fail(err),
    };

    println!("Result written to {}", outcome.receipt.path.display());

    match outcome.delivery {
        Some(DeliveryOutcome::Delivered(receipt)) => {
            println!("Result sent to {}", receipt.recipient);
            ExitCode::SUCCESS
        }
        Some(DeliveryOutcome::Failed(err)) => {
            eprintln!("Error: result was written but not delivered: {}", err);
            ExitCode::from(EXIT_DELIVERY_FAILED)
        }
        None => ExitCode::SUCCESS,
    }
}
