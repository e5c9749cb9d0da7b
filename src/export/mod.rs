mod pagination;
mod progress;

use bytesize::ByteSize;
use log::{debug, info};
use reqwest::Client;
use std::time::Instant;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::cli::Cli;
use crate::error::{ExportError, Result};
use crate::firestore::{self, PageResponse};
use crate::processing::process_documents;

pub use self::pagination::PageCursor;
use self::progress::Progress;

/// What to export and how to report it
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Documents URL including `pageSize`, without any page token
    pub request_url: String,
    pub quiet: bool,
}

impl ExportConfig {
    pub fn from_cli(args: &Cli) -> Self {
        let document_url =
            firestore::document_url_at(args.endpoint.as_str(), &args.project, &args.document);
        Self {
            request_url: firestore::request_url(&document_url, args.page_size),
            quiet: args.quiet,
        }
    }
}

/// Counters collected over one export
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub pages: u64,
    pub documents: u64,
    pub bytes_retrieved: u64,
    pub bytes_written: u64,
}

/// Fetch every page and write each document as one line to `writer`.
///
/// The writer is flushed before returning, whether the export succeeded or not.
pub async fn dump_documents<W: AsyncWrite + Unpin>(
    client: &Client,
    config: &ExportConfig,
    mut writer: W,
) -> Result<ExportStats> {
    debug!("Starting export from {}", config.request_url);
    let start_time = Instant::now();

    let progress = Progress::new(config.quiet);
    progress.start();

    let outcome = export_pages(client, config, &mut writer, &progress).await;
    let flushed = writer.flush().await.map_err(ExportError::Write);

    let stats = outcome?;
    flushed?;

    let elapsed = start_time.elapsed();
    info!(
        "Export completed: {} documents in {} pages ({} retrieved, {} written) in {:.2?}",
        stats.documents,
        stats.pages,
        ByteSize(stats.bytes_retrieved),
        ByteSize(stats.bytes_written),
        elapsed
    );

    Ok(stats)
}

async fn export_pages<W: AsyncWrite + Unpin>(
    client: &Client,
    config: &ExportConfig,
    writer: &mut W,
    progress: &Progress,
) -> Result<ExportStats> {
    let mut cursor = PageCursor::new(config.request_url.as_str());
    let mut stats = ExportStats::default();

    while let Some(url) = cursor.next_url() {
        debug!("Fetching page {}: {}", stats.pages + 1, url);
        let fetched = firestore::fetch_page(client, &url).await?;
        let PageResponse {
            next_page_token,
            documents,
        } = fetched.page;

        let processed = process_documents(&documents);
        writer
            .write_all(&processed.buffer)
            .await
            .map_err(ExportError::Write)?;

        stats.pages += 1;
        stats.documents += processed.doc_count;
        stats.bytes_retrieved += fetched.bytes;
        stats.bytes_written += processed.buffer.len() as u64;
        debug!(
            "Page {}: wrote {} documents (total: {})",
            stats.pages, processed.doc_count, stats.documents
        );

        progress.page_done();
        cursor.advance(next_page_token);
    }

    progress.finish();
    Ok(stats)
}
