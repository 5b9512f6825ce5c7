//! Bar Solver CLI - analyze a JSON problem document

use std::env;

use anyhow::{bail, Context, Result};
use log::info;

use bar_solver::analysis;
use bar_solver::prelude::*;

const USAGE: &str = "usage: bar-solve <input.json> [--cholesky] [--log] \
                     [--pivot-tolerance <tol>] [--zero-length-tolerance <tol>]";

fn parse_tolerance(flag: &str, value: Option<String>) -> Result<f64> {
    let Some(value) = value else {
        bail!("{} needs a value\n{}", flag, USAGE);
    };
    value
        .parse::<f64>()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut path = None;
    let mut options = AnalysisOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cholesky" => options.solver = LinearSolver::Cholesky,
            "--log" => options = options.with_logging(),
            "--pivot-tolerance" => {
                let tol = parse_tolerance(&arg, args.next())?;
                options = options.with_pivot_tolerance(tol);
            }
            "--zero-length-tolerance" => {
                let tol = parse_tolerance(&arg, args.next())?;
                options = options.with_zero_length_tolerance(tol);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            _ if path.is_none() => path = Some(arg.clone()),
            _ => bail!("{}", USAGE),
        }
    }
    let Some(path) = path else {
        bail!("{}", USAGE);
    };

    let model = bar_solver::input::load_path(&path)
        .with_context(|| format!("failed to load '{}'", path))?;
    info!(
        "Loaded {} nodes, {} elements from {}",
        model.num_node(),
        model.num_elem(),
        path
    );

    let preprocessed = preprocess(&model).context("invalid model")?;
    let solution = analysis::solve(&preprocessed, &options).context("analysis failed")?;
    let report = AnalysisReport::new(&solution, &preprocessed)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
