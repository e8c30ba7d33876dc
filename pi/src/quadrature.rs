use std::io;
use std::thread;

use thiserror::Error;

pub const MAX_INTERVALS: i64 = 2_147_483_647;

#[derive(Debug, Error)]
pub enum QuadratureError {
    #[error("interval count must be between 1 and 2147483647, got {0}")]
    BadIntervalCount(i64),
    #[error("thread count must be between 1 and 2147483647, got {0}")]
    BadThreadCount(i64),
    #[error("failed to start worker {index}")]
    WorkerSpawn {
        index: u32,
        #[source]
        source: io::Error,
    },
    #[error("worker {0} died before returning its partial sum")]
    WorkerLost(u32),
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
            return Err(QuadratureError::BadThreadCount(workers));
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
// worker count. The stride keeps the index sets disjoint without a mutex
// and spreads any remainder intervals one per worker.
fn assigned_indices(task: WorkerTask) -> impl Iterator<Item = u32> {
    (task.index..task.intervals).step_by(task.workers as usize)
}

fn partial_sum(task: WorkerTask) -> f64 {
    let mut sum = 0.0;
    for i in assigned_indices(task) {
        let x = task.width * (f64::from(i) + 0.5);
        sum += integrand(x);
    }
    sum
}

pub fn estimate_pi(job: QuadratureJob) -> Result<f64, QuadratureError> {
    let width = 1.0 / f64::from(job.intervals);

    let mut handles = Vec::with_capacity(job.workers as usize);
    for index in 0..job.workers {
        let task = WorkerTask {
            index,
            intervals: job.intervals,
            workers: job.workers,
            width,
        };
        let spawned = thread::Builder::new()
            .name(format!("pi-worker-{index}"))
            .spawn(move || partial_sum(task));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                // Never reduce over a partial pool: wait out the workers
                // that did start, then fail the whole estimate.
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(QuadratureError::WorkerSpawn { index, source });
            }
        }
    }

    // A partial sum only becomes readable here as the return value of a
    // joined worker. Folding in worker order keeps repeated runs
    // bit-identical.
    let mut total = 0.0;
    for (index, handle) in handles.into_iter().enumerate() {
        let partial = handle
            .join()
            .map_err(|_| QuadratureError::WorkerLost(index as u32))?;
        total += partial;
    }

    Ok(width * total)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn estimate(intervals: i64, workers: i64) -> f64 {
        let job = QuadratureJob::new(intervals, workers).unwrap();
        estimate_pi(job).unwrap()
    }

    #[test]
    fn every_interval_is_assigned_exactly_once() {
        for &(intervals, workers) in &[(1u32, 1u32), (10, 3), (10, 32), (97, 8), (1000, 7)] {
            let width = 1.0 / f64::from(intervals);
            let mut seen = vec![0u32; intervals as usize];
            for index in 0..workers {
                let task = WorkerTask {
                    index,
                    intervals,
                    workers,
                    width,
                };
                for i in assigned_indices(task) {
                    seen[i as usize] += 1;
                }
            }
            assert!(
                seen.iter().all(|&count| count == 1),
                "n={intervals} t={workers}: {seen:?}"
            );
        }
    }

    #[test]
    fn error_shrinks_as_intervals_grow() {
        let errors: Vec<f64> = [1_000, 10_000, 100_000, 1_000_000]
            .iter()
            .map(|&n| (estimate(n, 1) - PI).abs())
            .collect();
        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0], "errors not decreasing: {errors:?}");
        }
    }

    #[test]
    fn estimate_does_not_depend_on_thread_count() {
        let reference = estimate(1_000_000, 1);
        for workers in [2, 4, 8] {
            assert_abs_diff_eq!(estimate(1_000_000, workers), reference, epsilon = 1e-9);
        }
    }

    #[test]
    fn a_million_intervals_gives_six_correct_digits() {
        assert!((estimate(1_000_000, 1) - PI).abs() < 1e-6);
    }

    #[test]
    fn single_interval_is_the_midpoint_value() {
        // One interval: the estimate collapses to f(0.5) * 1.0 = 3.2.
        assert_abs_diff_eq!(estimate(1, 1), 3.2, epsilon = 1e-15);
        assert_abs_diff_eq!(estimate(1, 5), 3.2, epsilon = 1e-15);
    }

    #[test]
    fn surplus_workers_contribute_nothing() {
        assert_abs_diff_eq!(estimate(10, 32), estimate(10, 1), epsilon = 1e-9);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        assert_eq!(
            estimate(100_000, 4).to_bits(),
            estimate(100_000, 4).to_bits()
        );
    }

    #[test]
    fn rejects_out_of_range_arguments() {
        assert!(QuadratureJob::new(0, 1).is_err());
        assert!(QuadratureJob::new(-5, 1).is_err());
        assert!(QuadratureJob::new(MAX_INTERVALS + 1, 1).is_err());
        assert!(QuadratureJob::new(1_000, 0).is_err());
        assert!(QuadratureJob::new(1_000, -1).is_err());
        assert!(QuadratureJob::new(MAX_INTERVALS, 1).is_ok());
    }
}
