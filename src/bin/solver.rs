//! Command-line front-end (§4.12, §6): read a model from a file or standard
//! input, print it, solve it, print the solution, then a performance report.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process::ExitCode;
use std::time::Instant;

use milp_solver::report::SolveStats;
use milp_solver::{Problem, Solution, SolverConfig, SolverError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run() -> Result<(), SolverError> {
    let mut args = std::env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        return Err(SolverError::usage("usage: solver [path]"));
    }

    let mut source: Box<dyn Read> = match &path {
        Some(path) => Box::new(
            File::open(path).map_err(|e| SolverError::usage(format!("cannot open '{path}': {e}")))?,
        ),
        None => Box::new(io::stdin()),
    };
    let mut text = String::new();
    let _ = source
        .read_to_string(&mut text)
        .map_err(|e| SolverError::parse(format!("failed to read input: {e}")))?;

    let mut problem = Problem::from_stream(BufReader::new(text.as_bytes()), SolverConfig::default())?;
    println!("{problem}");

    let start = Instant::now();
    let solution = problem.solve()?;
    let stats = SolveStats::capture(start.elapsed());

    print_solution(&solution);
    println!();
    println!("{stats}");
    Ok(())
}

fn print_solution(solution: &Solution) {
    println!("================== Solution ==================");
    if solution.is_unbounded() {
        println!("infinite");
        return;
    }
    println!(
        "Optimal found in {} iterations (PhaseI {} + PhaseII {})",
        solution.total_iter(),
        solution.p1_iter(),
        solution.p2_iter()
    );
    println!("z*: {}", solution.z());
    let values: Vec<String> = solution.x_vec().iter().map(|v| format!("{v:.3}")).collect();
    println!("x*: ({})", values.join(", "));
}
