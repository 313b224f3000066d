//! Chunked CSV writer.
//!
//! Drives the synthesizer in bounded batches and appends each batch to a single
//! output file, so memory use never exceeds one batch of records.

use crate::error::{GeneratorError, Result};
use crate::metrics::DatasetMetrics;
use crate::synthesizer::RecordSynthesizer;
use crate::types::transaction::Transaction;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a completed stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// File that was written
    pub path: PathBuf,
    /// Number of batches appended
    pub batches: usize,
    /// Number of data rows written
    pub records: usize,
    /// Rows labelled as fraud
    pub fraud_labels: u64,
}

/// Streams synthesized batches of at most `chunk_size` records to a CSV file
pub struct ChunkedWriter {
    synthesizer: RecordSynthesizer,
    chunk_size: usize,
}

impl ChunkedWriter {
    /// Create a writer; fails with `InvalidArgument` if `chunk_size` is zero
    pub fn new(synthesizer: RecordSynthesizer, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(GeneratorError::invalid("chunk size must be at least 1"));
        }
        Ok(Self {
            synthesizer,
            chunk_size,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Sizes of the batches a stream of `total` records is split into
    pub fn batch_sizes(&self, total: usize) -> impl Iterator<Item = usize> {
        let chunk_size = self.chunk_size;
        (0..total)
            .step_by(chunk_size)
            .map(move |start| chunk_size.min(total - start))
    }

    /// Write `total` records to `destination`, creating parent directories.
    ///
    /// The first batch replaces any existing file and carries the header; later
    /// batches are appended without one. A failure aborts the stream and leaves
    /// the batches already flushed on disk.
    pub fn stream<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        destination: &Path,
        total: usize,
    ) -> Result<StreamSummary> {
        if total == 0 {
            return Err(GeneratorError::invalid("total records must be at least 1"));
        }

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
        }

        let batch_count = total.div_ceil(self.chunk_size);
        info!(
            path = %destination.display(),
            total,
            chunk_size = self.chunk_size,
            batches = batch_count,
            anchor = %self.synthesizer.anchor().to_rfc3339(),
            "Streaming records to CSV"
        );

        let mut metrics = DatasetMetrics::new();
        let mut written = 0usize;

        for (index, size) in self.batch_sizes(total).enumerate() {
            let first = index == 0;
            let records = self.synthesizer.synthesize(rng, size)?;
            write_batch(destination, &records, first, !first)?;
            metrics.record_batch(&records);
            written += records.len();

            info!(
                batch = index + 1,
                of = batch_count,
                rows = records.len(),
                written,
                progress = format!("{:.1}%", written as f64 * 100.0 / total as f64),
                "Batch saved"
            );
        }

        metrics.print_summary();

        Ok(StreamSummary {
            path: destination.to_path_buf(),
            batches: batch_count,
            records: written,
            fraud_labels: metrics.fraud_labels,
        })
    }
}

/// Stream `total` records in batches of `chunk_size` to `destination`.
///
/// Timestamps are drawn relative to `anchor`; all other randomness comes from `rng`.
pub fn stream<R: Rng + ?Sized>(
    rng: &mut R,
    anchor: DateTime<Utc>,
    destination: &Path,
    total: usize,
    chunk_size: usize,
) -> Result<StreamSummary> {
    let writer = ChunkedWriter::new(RecordSynthesizer::new(anchor)?, chunk_size)?;
    writer.stream(rng, destination, total)
}

/// Serialize one batch to `path`.
///
/// With `append` the rows go after the existing content; otherwise the file is
/// truncated first. The header row is emitted only when `write_header` is set.
pub fn write_batch(
    path: &Path,
    records: &[Transaction],
    write_header: bool,
    append: bool,
) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| GeneratorError::io(path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| GeneratorError::io(path, e))?;

    debug!(
        path = %path.display(),
        rows = records.len(),
        write_header,
        append,
        "Batch flushed"
    );
    Ok(())
}

/// Map a csv error to `Io` when the underlying write failed, `Csv` otherwise
fn csv_error(path: &Path, err: csv::Error) -> GeneratorError {
    if !err.is_io_error() {
        return GeneratorError::Csv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => GeneratorError::io(path, source),
        _ => GeneratorError::io(path, std::io::Error::other("csv write failed")),
    }
}
