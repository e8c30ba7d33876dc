use std::env;
use std::io;
use std::process;
use std::thread;

use thiserror::Error;

// f(93) is the last Fibonacci number that fits in a u64, so the sequence
// caps out at 94 elements.
const MAX_ELEMENTS: i64 = 94;

#[derive(Debug, Error)]
enum FibonacciError {
    #[error("element count must be positive, got {0}")]
    NonPositiveCount(i64),
    #[error("element count must be at most 94, got {0} (later terms overflow 64-bit integers)")]
    CountTooLarge(i64),
    #[error("failed to start worker thread")]
    WorkerSpawn(#[source] io::Error),
    #[error("worker thread died before returning the sequence")]
    WorkerLost,
}

fn validate_count(raw: i64) -> Result<usize, FibonacciError> {
    if raw < 1 {
        return Err(FibonacciError::NonPositiveCount(raw));
    }
    if raw > MAX_ELEMENTS {
        return Err(FibonacciError::CountTooLarge(raw));
    }
    Ok(raw as usize)
}

fn generate_sequence(count: usize) -> Vec<u64> {
    let mut sequence = Vec::with_capacity(count);
    for i in 0..count {
        let next = match i {
            0 => 0,
            1 => 1,
            _ => sequence[i - 1] + sequence[i - 2],
        };
        sequence.push(next);
    }
    sequence
}

fn generate_on_worker(count: usize) -> Result<Vec<u64>, FibonacciError> {
    let handle = thread::Builder::new()
        .name("fib-worker".into())
        .spawn(move || generate_sequence(count))
        .map_err(FibonacciError::WorkerSpawn)?;

    // The sequence only exists to this thread once the worker has been
    // joined; printing before that point would be racy.
    handle.join().map_err(|_| FibonacciError::WorkerLost)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <element_count>", args[0]);
        eprintln!("Example: {} 10", args[0]);
        process::exit(1);
    }

    let raw: i64 = match args[1].parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid element count: {}", args[1]);
            process::exit(1);
        }
    };

    let count = match validate_count(raw) {
        Ok(count) => count,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    println!("Generating the first {count} Fibonacci numbers...");

    let sequence = match generate_on_worker(count) {
        Ok(sequence) => sequence,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    println!("Fibonacci sequence:");
    for (i, value) in sequence.iter().enumerate() {
        println!("f({i}) = {value}");
    }
}
