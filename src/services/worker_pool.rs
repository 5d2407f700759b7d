//! Fixed-size async worker pool over bounded channels.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A pool of `workers` tasks that share one job queue.
///
/// Both queues hold `workers * 2` items. After [`WorkerPool::close`] the
/// workers drain what is queued and exit; the result stream ends once the
/// last one has gone.
pub struct WorkerPool<J, R> {
    jobs: Option<mpsc::Sender<J>>,
    results: mpsc::Receiver<R>,
    workers: Vec<JoinHandle<()>>,
}

impl<J, R> WorkerPool<J, R>
where
    J: Send + 'static,
    R: Send + 'static,
{
    pub fn start<F, Fut>(workers: usize, handler: F) -> Self
    where
        F: Fn(J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let workers = workers.max(1);
        let (job_tx, job_rx) = mpsc::channel::<J>(workers * 2);
        let (result_tx, result_rx) = mpsc::channel::<R>(workers * 2);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let handler = Arc::new(handler);

        let handles = (0..workers)
            .map(|worker_id| {
                let job_rx = Arc::clone(&job_rx);
                let result_tx = result_tx.clone();
                let handler = Arc::clone(&handler);

                tokio::spawn(async move {
                    loop {
                        let job = job_rx.lock().await.recv().await;
                        let Some(job) = job else { break };

                        let result = handler(job).await;
                        if result_tx.send(result).await.is_err() {
                            debug!(worker_id, "result receiver dropped, stopping worker");
                            break;
                        }
                    }
                    debug!(worker_id, "worker finished");
                })
            })
            .collect();

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            workers: handles,
        }
    }

    /// Queue one job, waiting for room. Hands the job back if the pool no
    /// longer accepts input.
    ///
    /// Results must be drained concurrently once more than `workers * 4`
    /// jobs are outstanding.
    pub async fn submit(&self, job: J) -> Result<(), J> {
        match &self.jobs {
            Some(jobs) => jobs.send(job).await.map_err(|e| e.0),
            None => Err(job),
        }
    }

    /// Signal that no more jobs will be submitted.
    pub fn close(&mut self) {
        self.jobs = None;
    }

    /// Take the job sender, for feeding the pool from another task.
    /// Dropping it has the same effect as [`WorkerPool::close`].
    pub fn take_submitter(&mut self) -> Option<mpsc::Sender<J>> {
        self.jobs.take()
    }

    /// Next finished result, or `None` once every worker has exited.
    pub async fn next_result(&mut self) -> Option<R> {
        self.results.recv().await
    }

    /// Wait for the worker tasks themselves.
    pub async fn join(self) {
        for handle in self.workers {
            if let Err(e) = handle.await {
                warn!(error = %e, "worker task failed");
            }
        }
    }

    /// Feed every job, close the input, and collect all results.
    pub async fn run(mut self, jobs: Vec<J>) -> Vec<R> {
        let mut results = Vec::with_capacity(jobs.len());

        let producer = self.take_submitter().map(|submitter| {
            tokio::spawn(async move {
                for job in jobs {
                    if submitter.send(job).await.is_err() {
                        break;
                    }
                }
            })
        });

        while let Some(result) = self.next_result().await {
            results.push(result);
        }

        if let Some(producer) = producer {
            if let Err(e) = producer.await {
                warn!(error = %e, "job producer failed");
            }
        }
        self.join().await;

        results
    }
}
