//! Fixed-size worker pool feeding discovered paths through the pipeline.
//!
//! A producer task fills an unbounded queue and closes it; `workers`
//! consumers pull from the shared receiver until it is drained. Outcomes are
//! delivered through a callback as each file finishes, in completion order.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};

use super::processor::PhotoPipeline;
use crate::types::{ProcessingOutcome, ProcessingStats};

/// Distributes jobs to a fixed number of concurrent pipeline executions.
pub struct Dispatcher {
    pipeline: Arc<PhotoPipeline>,
    workers: usize,
}

impl Dispatcher {
    /// `workers` is clamped to at least 1.
    pub fn new(pipeline: Arc<PhotoPipeline>, workers: usize) -> Self {
        Self {
            pipeline,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process every path, calling `on_outcome` once per file.
    ///
    /// A failing file is reported and the batch keeps going. Returns once
    /// every consumer has exited.
    pub async fn run<F>(&self, paths: Vec<PathBuf>, on_outcome: F) -> ProcessingStats
    where
        F: Fn(ProcessingOutcome) + Send + Sync + 'static,
    {
        let start = Instant::now();
        let (tx, rx) = mpsc::unbounded_channel::<PathBuf>();

        let producer = tokio::spawn(async move {
            for path in paths {
                if tx.send(path).is_err() {
                    break;
                }
            }
            // Dropping `tx` closes the queue
        });

        let rx = Arc::new(Mutex::new(rx));
        let on_outcome = Arc::new(on_outcome);
        let mut handles = Vec::with_capacity(self.workers);

        for worker in 0..self.workers {
            let rx = rx.clone();
            let pipeline = self.pipeline.clone();
            let on_outcome = on_outcome.clone();

            handles.push(tokio::spawn(async move {
                let mut succeeded = 0usize;
                let mut failed = 0usize;
                loop {
                    // Hold the receiver only long enough to take one job
                    let next = rx.lock().await.recv().await;
                    let Some(path) = next else {
                        break;
                    };

                    let result = pipeline.process(&path).await;
                    if result.is_ok() {
                        succeeded += 1;
                    } else {
                        failed += 1;
                    }
                    on_outcome(ProcessingOutcome { path, result });
                }
                tracing::trace!("Worker {worker} finished ({succeeded} ok, {failed} failed)");
                (succeeded, failed)
            }));
        }

        if let Err(e) = producer.await {
            tracing::error!("Job producer panicked: {e}");
        }

        let mut stats = ProcessingStats::default();
        for handle in futures_util::future::join_all(handles).await {
            match handle {
                Ok((succeeded, failed)) => {
                    stats.succeeded += succeeded;
                    stats.failed += failed;
                }
                Err(e) => tracing::error!("Worker task panicked: {e}"),
            }
        }

        stats.total_seconds = start.elapsed().as_secs_f64();
        let processed = stats.succeeded + stats.failed;
        if stats.total_seconds > 0.0 {
            stats.images_per_second = processed as f64 / stats.total_seconds;
        }
        stats
    }
}
