//! Batched delivery of loaded templates to the import API.
//!
//! Templates are cut into consecutive batches of at most [`BATCH_SIZE`] and sent
//! one request at a time, in order. Every batch stands alone: a serialization
//! error, transport error or non-2xx response is logged and the next batch is sent
//! anyway. Partial delivery is a normal outcome and is only visible in the log
//! lines and in the returned [`SyncReport`].

use tracing::{debug, error, info};

use crate::config::BATCH_SIZE;
use crate::contract::Uploader;
use crate::template::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Delivered { status: u16 },
    Rejected { status: u16, body: String },
    TransportFailed { error: String },
    SerializeFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// 1-based batch number.
    pub number: usize,
    pub size: usize,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub batches: Vec<BatchReport>,
}

impl SyncReport {
    pub fn delivered(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| matches!(b.outcome, BatchOutcome::Delivered { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.batches.len() - self.delivered()
    }
}

/// Number of batches needed for `len` templates.
pub fn batch_count(len: usize) -> usize {
    len.div_ceil(BATCH_SIZE)
}

/// Consecutive batches of at most [`BATCH_SIZE`] templates, in input order.
pub fn batches(templates: &[Template]) -> std::slice::Chunks<'_, Template> {
    templates.chunks(BATCH_SIZE)
}

pub async fn synchronise<U>(templates: &[Template], uploader: &U) -> SyncReport
where
    U: Uploader + ?Sized,
{
    let total = batch_count(templates.len());
    info!(templates = templates.len(), batches = total, "[SYNC] Starting batched import");

    let mut report = SyncReport::default();

    for (idx, batch) in batches(templates).enumerate() {
        let number = idx + 1;
        let size = batch.len();

        let body = match serde_json::to_string(batch) {
            Ok(body) => body,
            Err(e) => {
                error!(batch = number, error = ?e, "[SYNC][ERROR] Failed to serialize batch");
                println!("Error marshaling batch {}: {}", number, e);
                report.batches.push(BatchReport {
                    number,
                    size,
                    outcome: BatchOutcome::SerializeFailed {
                        error: e.to_string(),
                    },
                });
                continue;
            }
        };

        println!("\nSending batch {}/{} ({} templates)...", number, total, size);
        info!(batch = number, total, size, bytes = body.len(), "[SYNC][UPLOAD] Sending batch");

        let outcome = match uploader.import_batch(body).await {
            Ok(resp) if resp.is_success() => {
                info!(batch = number, status = resp.status, "[SYNC][UPLOAD] Batch delivered");
                println!("Batch {} sent successfully (status: {})", number, resp.status);
                BatchOutcome::Delivered {
                    status: resp.status,
                }
            }
            Ok(resp) => {
                error!(batch = number, status = resp.status, body = %resp.body, "[SYNC][ERROR][UPLOAD] Batch rejected");
                println!("Batch {} failed (status: {}): {}", number, resp.status, resp.body);
                BatchOutcome::Rejected {
                    status: resp.status,
                    body: resp.body,
                }
            }
            Err(e) => {
                error!(batch = number, error = ?e, "[SYNC][ERROR][UPLOAD] Failed to send batch");
                println!("Error sending batch {}: {}", number, e);
                BatchOutcome::TransportFailed {
                    error: e.to_string(),
                }
            }
        };

        report.batches.push(BatchReport {
            number,
            size,
            outcome,
        });
    }

    debug!(?report, "[SYNC] Batched import finished");
    report
}
