//! Fetching a url and printing it, as run by the binary.

use std::io::{self, Write};

use micro_fetch::client::Client;
use micro_fetch::connection::Connect;
use micro_fetch::protocol::FetchError;
use micro_fetch::render::render;
use thiserror::Error;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use crate::args::FetchArgs;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fetch {
        #[from]
        source: FetchError,
    },

    #[error("can't write output: {source}")]
    Output {
        #[from]
        source: io::Error,
    },

    #[error("can't start runtime: {source}")]
    Runtime { source: io::Error },
}

/// Installs a subscriber logging to stderr, stdout only carries the page.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(io::stderr).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("global subscriber already installed");
    }
}

/// Builds a client from the command line options.
///
/// # Errors
///
/// Fails if the trust store can't be loaded.
pub fn build_client(args: &FetchArgs) -> Result<Client, FetchError> {
    let mut builder = Client::builder().trust_store(args.trust_store.clone());
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Fetches the url and writes the body without markup to `out`.
///
/// # Errors
///
/// Returns [`AppError::Fetch`] if the fetch fails, nothing is written then.
pub async fn fetch_and_render<C, W>(client: &Client<C>, url: &str, out: W) -> Result<(), AppError>
where
    C: Connect,
    W: Write,
{
    let response = client.fetch(url).await?;
    render(response.body(), out)?;
    Ok(())
}

/// Runs a single fetch on a current-thread runtime and prints the result to stdout.
///
/// # Errors
///
/// Returns [`AppError`] if the runtime can't start, the fetch fails or stdout
/// can't be written.
pub fn run(args: &FetchArgs) -> Result<(), AppError> {
    init_tracing(args.verbosity);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| AppError::Runtime { source })?;

    let client = build_client(args)?;
    runtime.block_on(fetch_and_render(&client, &args.url, io::stdout().lock()))
}
