//! contact-relay entry point.
//!
//! One invocation performs one submission:
//!
//! ```text
//! main()
//!  └─ load_config_or_default(--config-url)   -- disabled default on failure
//!  └─ select_sink(&config)                   -- MailtoSink | RemoteStoreSink
//!  └─ SubmissionService::submit(fields)
//!       ├─ MailHandoff  → launch the mail client with the mailto: URI
//!       ├─ Stored       → confirmation status, form considered cleared
//!       └─ Failed       → fallback-address status, exit code 1
//! ```

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use contact_core::contact::ContactFields;
use contact_core::mailto::FALLBACK_RECIPIENT;
use contact_relay::infrastructure::sinks::CONTACT_COLLECTION;
use contact_relay::{load_config_or_default, select_sink, Delivery, SubmissionOutcome, SubmissionService};

#[derive(Parser, Debug)]
#[command(name = "contact-relay", version, about = "Relay a contact message via mail client or remote store")]
struct Cli {
    /// URL of the runtime configuration document.
    #[arg(
        long,
        env = "CONTACT_CONFIG_URL",
        default_value = "http://127.0.0.1:8080/config/app-config.json"
    )]
    config_url: String,

    /// Mail recipient on the handoff path, also quoted as the manual
    /// fallback address in status text.
    #[arg(long, env = "CONTACT_RECIPIENT", default_value = FALLBACK_RECIPIENT)]
    recipient: String,

    /// Document store collection written to on the enabled path.
    #[arg(long, default_value = CONTACT_COLLECTION)]
    collection: String,

    /// Sender name.
    #[arg(long)]
    name: String,

    /// Sender email address.
    #[arg(long)]
    email: String,

    /// Message text.
    #[arg(long)]
    message: String,

    /// Print the mailto: URI instead of launching the mail client.
    #[arg(long)]
    no_launch: bool,
}

/// Identification string stamped into delivered documents, the CLI
/// counterpart of a browser's user-agent header.
fn user_agent() -> String {
    format!(
        "contact-relay/{} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(config_url = %cli.config_url, "contact-relay starting");

    let http = reqwest::Client::new();
    let config = load_config_or_default(&http, &cli.config_url).await;
    let sink = select_sink(&config, http, &cli.recipient, &cli.collection);
    let service = SubmissionService::new(sink, user_agent(), cli.recipient.clone());

    let outcome = service
        .submit(ContactFields {
            name: cli.name,
            email: cli.email,
            message: cli.message,
        })
        .await;

    match outcome {
        SubmissionOutcome::Delivered { delivery, status } => {
            if let Delivery::MailHandoff { uri } = &delivery {
                if cli.no_launch {
                    println!("{uri}");
                } else if let Err(e) = open::that_detached(uri) {
                    // The status text already quotes the manual address,
                    // so a failed launch is not fatal.
                    warn!(error = %e, "could not launch the mail client");
                }
            }
            println!("{status}");
            Ok(())
        }
        SubmissionOutcome::Invalid { status, .. } => {
            eprintln!("{status}");
            std::process::exit(2);
        }
        SubmissionOutcome::Failed { status } => {
            eprintln!("{status}");
            std::process::exit(1);
        }
        // A single-shot invocation has no concurrent submissions.
        SubmissionOutcome::Busy => Ok(()),
    }
}
