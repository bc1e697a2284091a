//! Background task definitions.
//!
//! Tasks run through a Postgres-backed queue, so the API database doubles as
//! the broker and the result store. The API process enqueues; the worker
//! binary runs the same task definition and consumes.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use underway::{
    Queue, Task, Worker,
    task::{Result as TaskResult, TaskId},
};

/// Queue name shared by the API (producer) and the worker (consumer).
pub const OCR_QUEUE: &str = "ocr";

/// Input for an OCR scan of an uploaded bill image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrScan {
    pub upload_id: i64,
}

/// OCR scan task. The step is a stub: it acknowledges the upload and
/// completes.
pub struct OcrTask;

impl Task for OcrTask {
    type Input = OcrScan;
    type Output = ();

    async fn execute(
        &self,
        _tx: Transaction<'_, Postgres>,
        input: Self::Input,
    ) -> TaskResult<Self::Output> {
        // TODO: OCR pipeline
        tracing::info!(upload_id = input.upload_id, status = "stub", "ocr scan");
        Ok(())
    }
}

/// Build the OCR queue against the given pool, running the queue library's
/// own migrations first. Both binaries go through this so the queue name
/// cannot drift between producer and consumer.
pub async fn build_ocr_queue(pool: PgPool) -> anyhow::Result<Queue<OcrTask>> {
    underway::run_migrations(&pool).await?;

    let queue = Queue::builder().name(OCR_QUEUE).pool(pool).build().await?;
    Ok(queue)
}

/// Producer-side handle for the OCR queue.
///
/// Enqueueing hands back the queue's task id, which callers report as the
/// tracking identifier.
pub struct OcrDispatcher {
    pool: PgPool,
    queue: Queue<OcrTask>,
}

pub async fn build_ocr_dispatcher(pool: PgPool) -> anyhow::Result<OcrDispatcher> {
    let queue = build_ocr_queue(pool.clone()).await?;
    Ok(OcrDispatcher { pool, queue })
}

impl OcrDispatcher {
    pub async fn enqueue(&self, input: &OcrScan) -> anyhow::Result<TaskId> {
        let task_id = self.queue.enqueue(&self.pool, &OcrTask, input).await?;
        Ok(task_id)
    }
}

/// Consumer side: a worker polling the OCR queue.
pub async fn build_ocr_worker(pool: PgPool) -> anyhow::Result<Worker<OcrTask>> {
    let queue = build_ocr_queue(pool).await?;
    Ok(Worker::new(Arc::new(queue), OcrTask))
}
