use std::env;
use std::process::ExitCode;

use math::Polynomial;
use pipeline_core::{EvaluationRequest, Pipeline};

/// Environment variable supplying the chain length; the launch environment
/// decides how many workers take part, not the program's own arguments.
const WORKERS_ENV: &str = "POLYEVAL_WORKERS";

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <x> <coefficients...>");
    eprintln!("  x            - point at which to evaluate the polynomial");
    eprintln!("  coefficients - polynomial coefficients (a0 a1 a2 ...)");
    eprintln!();
    eprintln!("The chain length is read from {WORKERS_ENV} (default 1).");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {WORKERS_ENV}=4 {program} 2.0 1 2 3 4");
    eprintln!("  This computes P(2.0) for polynomial 4*x^3 + 3*x^2 + 2*x + 1");
}

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "polyeval".to_string());

    let Some(x_arg) = args.next() else {
        eprintln!("Error: insufficient arguments provided.");
        print_usage(&program);
        return ExitCode::FAILURE;
    };
    let Ok(x) = x_arg.parse::<f32>() else {
        eprintln!("Error: invalid evaluation point `{x_arg}`.");
        print_usage(&program);
        return ExitCode::FAILURE;
    };

    let polynomial = match args.collect::<Vec<_>>().join(" ").parse::<Polynomial<f32>>() {
        Ok(polynomial) => polynomial,
        Err(err) => {
            eprintln!("Error parsing coefficients: {err}");
            print_usage(&program);
            return ExitCode::FAILURE;
        }
    };

    let workers = match env::var(WORKERS_ENV) {
        Ok(raw) => match raw.parse::<usize>() {
            Ok(workers) => workers,
            Err(_) => {
                eprintln!("Error: {WORKERS_ENV} must be a positive integer, got `{raw}`.");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => 1,
    };

    let pipeline = match Pipeline::new(workers) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Polynomial: {polynomial}");
    println!("Degree: {}", polynomial.degree());
    println!("Evaluation point: x = {x}");
    println!("Number of workers: {workers}");

    let request = match EvaluationRequest::new(x, polynomial.into_coefficients()) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline.evaluate(request) {
        Ok(evaluation) => {
            print!("{evaluation}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
