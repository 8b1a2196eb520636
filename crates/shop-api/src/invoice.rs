//! # Invoice Writer
//!
//! Generates an order's invoice once and fans the bytes out to two sinks:
//! the cached file `<invoice_dir>/invoice-<orderId>.pdf` and the response
//! body. The file handle is closed on every path; a partially written file
//! is removed when generation fails.

use shop_core::{InvoiceDocument, Order, ShopError, ShopResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Writer that duplicates every write into two sinks
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// Writes invoices to disk and returns the response bytes
#[derive(Debug, Clone)]
pub struct InvoiceWriter {
    dir: Arc<PathBuf>,
}

impl InvoiceWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where an order's invoice is cached
    pub fn path_for(&self, order: &Order) -> PathBuf {
        self.dir.join(order.invoice_name())
    }

    /// Render the order's invoice in one pass into the cache file and memory
    pub async fn generate(&self, order: &Order) -> ShopResult<Vec<u8>> {
        let document = InvoiceDocument::for_order(order);
        let path = self.path_for(order);

        tokio::task::spawn_blocking(move || write_both(&document, &path))
            .await
            .map_err(|e| ShopError::Internal(format!("Invoice task failed: {}", e)))?
    }
}

fn write_both(document: &InvoiceDocument, path: &Path) -> ShopResult<Vec<u8>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut tee = Tee::new(BufWriter::new(file), Vec::new());
    let outcome = document.write_to(&mut tee);

    let (file, body) = tee.into_parts();
    drop(file);

    match outcome {
        Ok(()) => {
            debug!(path = %path.display(), bytes = body.len(), "Wrote invoice");
            Ok(body)
        }
        Err(err) => {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), "Failed to remove partial invoice: {}", e);
            }
            Err(err)
        }
    }
}
