pub mod cli;
pub mod error;
pub mod export;
pub mod firestore;
pub mod output;
pub mod processing;

use std::path::Path;

use crate::error::Result;

pub async fn run() -> Result<()> {
    let args = cli::Cli::parse_args()?;

    // Configure logger based on debug flag
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
        log::debug!("Debug logging enabled");
    } else {
        env_logger::init();
    }

    let config = export::ExportConfig::from_cli(&args);
    log::info!(
        "Exporting {} from project {} ({} documents per page)",
        args.document,
        args.project,
        args.page_size
    );

    let client = firestore::create_client()?;
    let writer = output::create_output_writer(Path::new(output::RESULT_FILE)).await?;

    export::dump_documents(&client, &config, writer).await?;
    Ok(())
}
