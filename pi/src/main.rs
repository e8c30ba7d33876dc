mod quadrature;

use std::env;
use std::process;
use std::time::Instant;

use quadrature::QuadratureJob;

const PI_REFERENCE: f64 = 3.141592653589793238462643;

fn print_usage(program: &str) {
    eprintln!("Usage: {} <intervals> [threads]", program);
    eprintln!("  intervals: number of quadrature subintervals, 1 to 2147483647");
    eprintln!("  threads: optional, defaults to 1");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let intervals: i64 = match args[1].parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid interval count: {}", args[1]);
            process::exit(1);
        }
    };

    let threads: i64 = match args.get(2) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Invalid thread count: {raw}");
                process::exit(1);
            }
        },
        None => 1,
    };

    let job = match QuadratureJob::new(intervals, threads) {
        Ok(job) => job,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    println!("Estimating pi over {intervals} intervals using {threads} threads...");

    let start = Instant::now();
    let estimate = match quadrature::estimate_pi(job) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    println!("pi is approximately = {estimate:.20}");
    println!("Error               = {:.20}", (estimate - PI_REFERENCE).abs());
    println!("Execution time      = {:.6} seconds", elapsed.as_secs_f64());
}
