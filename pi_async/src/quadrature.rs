use thiserror::Error;
use tokio::task;

pub const MAX_INTERVALS: i64 = 2_147_483_647;

#[derive(Debug, Error)]
pub enum QuadratureError {
    #[error("interval count must be between 1 and 2147483647, got {0}")]
    BadIntervalCount(i64),
    #[error("task count must be between 1 and 2147483647, got {0}")]
    BadTaskCount(i64),
    #[error("worker {index} died before returning its partial sum")]
    WorkerLost {
        index: u32,
        #[source]
        source: task::JoinError,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct QuadratureJob {
    intervals: u32,
    workers: u32,
}

impl QuadratureJob {
    pub fn new(intervals: i64, workers: i64) -> Result<Self, QuadratureError> {
        if intervals < 1 || intervals > MAX_INTERVALS {
            return Err(QuadratureError::BadIntervalCount(intervals));
        }
        if workers < 1 || workers > MAX_INTERVALS {
            return Err(QuadratureError::BadTaskCount(workers));
        }
        Ok(QuadratureJob {
            intervals: intervals as u32,
            workers: workers as u32,
        })
    }
}

// Integrand whose integral over [0, 1] is pi.
fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

// Everything a worker needs, copied in by value at spawn time.
#[derive(Debug, Clone, Copy)]
struct WorkerTask {
    index: u32,
    intervals: u32,
    workers: u32,
    width: f64,
}

// Worker w owns exactly the interval indices congruent to w modulo the
// worker count, so the index sets stay disjoint without any locking.
fn partial_sum(work: WorkerTask) -> f64 {
    let mut sum = 0.0;
    for i in (work.index..work.intervals).step_by(work.workers as usize) {
        let x = work.width * (f64::from(i) + 0.5);
        sum += integrand(x);
    }
    sum
}

pub async fn estimate_pi(job: QuadratureJob) -> Result<f64, QuadratureError> {
    let width = 1.0 / f64::from(job.intervals);

    let mut handles = Vec::with_capacity(job.workers as usize);
    for index in 0..job.workers {
        let work = WorkerTask {
            index,
            intervals: job.intervals,
            workers: job.workers,
            width,
        };
        // CPU-bound accumulation belongs on the blocking pool, not the
        // async executor.
        handles.push(task::spawn_blocking(move || partial_sum(work)));
    }

    // Await every worker before reading any partial sum, folding in worker
    // order so repeated runs stay bit-identical.
    let mut total = 0.0;
    for (index, handle) in handles.into_iter().enumerate() {
        let partial = handle.await.map_err(|source| QuadratureError::WorkerLost {
            index: index as u32,
            source,
        })?;
        total += partial;
    }

    Ok(width * total)
}
