use std::env;
use std::error::Error;
use std::process;
use std::time::Instant;

use fanmin::{Executor, FanoutMinBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("threaded_search: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data: Vec<i64> = (0..options.len)
        .map(|_| rng.gen_range(0..i32::MAX as i64))
        .collect();

    // Threaded search, timed from range computation through the final combine.
    let started = Instant::now();
    let engine = FanoutMinBuilder::new(&data)
        .with_fanout(options.l1, options.l2)
        .with_executor(options.executor)
        .build();
    let min = match engine.run() {
        Ok(min) => min,
        Err(err) => {
            eprintln!("threaded_search: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            process::exit(1);
        }
    };
    let threaded_ms = started.elapsed().as_secs_f64() * 1_000.0;

    println!("\nThreaded search:");
    println!("\tThe minimum is: {min}");
    println!("\tTime taken: {threaded_ms:.3}ms.");

    // Linear baseline over the same data.
    let started = Instant::now();
    let linear = data
        .iter()
        .copied()
        .min()
        .expect("input is non-empty when the threaded search succeeded");
    let linear_ms = started.elapsed().as_secs_f64() * 1_000.0;

    println!("Linear search:");
    println!("\tThe minimum is: {linear}");
    println!("\tTime taken: {linear_ms:.3}ms.\n");
}

struct Options {
    len: usize,
    l1: usize,
    l2: usize,
    seed: Option<u64>,
    executor: Executor,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut len = 10_000usize;
        let mut l1 = 5usize;
        let mut l2 = 20usize;
        let mut seed = None;
        let mut executor = Executor::Threads;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--len=") {
                len = parse_count("--len", value)?;
            } else if arg == "--len" {
                len = parse_count("--len", &next_value(&mut args, "--len")?)?;
            } else if let Some(value) = arg.strip_prefix("--l1=") {
                l1 = parse_count("--l1", value)?;
            } else if arg == "--l1" {
                l1 = parse_count("--l1", &next_value(&mut args, "--l1")?)?;
            } else if let Some(value) = arg.strip_prefix("--l2=") {
                l2 = parse_count("--l2", value)?;
            } else if arg == "--l2" {
                l2 = parse_count("--l2", &next_value(&mut args, "--l2")?)?;
            } else if let Some(value) = arg.strip_prefix("--seed=") {
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| "seed must be an unsigned integer".to_string())?,
                );
            } else if arg == "--seed" {
                seed = Some(
                    next_value(&mut args, "--seed")?
                        .parse::<u64>()
                        .map_err(|_| "seed must be an unsigned integer".to_string())?,
                );
            } else if let Some(value) = arg.strip_prefix("--executor=") {
                executor = parse_executor(value)?;
            } else if arg == "--executor" {
                executor = parse_executor(&next_value(&mut args, "--executor")?)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            len,
            l1,
            l2,
            seed,
            executor,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin threaded_search [-- <options>]

Options:
  --len <N>                     Number of random elements to generate (default: 10000)
  --l1 <N>                      Level-1 fan-out: branch workers (default: 5)
  --l2 <N>                      Level-2 fan-out: leaf workers per branch (default: 20)
  --seed <N>                    Seed the random generator for reproducible input
  --executor <threads|pool>     Worker dispatch model (default: threads)
  -h, --help                    Print this help message

Examples:
  cargo run --bin threaded_search
  cargo run --bin threaded_search -- --len 1000000 --l1 8 --l2 32 --executor pool
"
        );
    }
}

fn next_value<I, T>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    args.next()
        .map(Into::into)
        .ok_or_else(|| format!("missing value after {flag}"))
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} must be a positive integer")),
    }
}

fn parse_executor(value: &str) -> Result<Executor, String> {
    match value {
        "threads" => Ok(Executor::Threads),
        #[cfg(feature = "parallel")]
        "pool" => Ok(Executor::Pool),
        #[cfg(not(feature = "parallel"))]
        "pool" => Err("the pool executor requires the 'parallel' feature".to_string()),
        other => Err(format!("unknown executor '{other}'")),
    }
}
