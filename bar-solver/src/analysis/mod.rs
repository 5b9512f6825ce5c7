//! Analysis options and the linear static solution pipeline

mod boundary;

pub use boundary::apply_dirichlet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::assembly;
use crate::error::{BarError, BarResult};
use crate::math;
use crate::preprocess::PreprocessedModel;
use crate::results::Solution;

/// Dense direct solver used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolver {
    /// LU decomposition with partial pivoting
    #[default]
    Lu,
    /// Cholesky decomposition (requires a positive definite system)
    Cholesky,
}

/// Options for linear static analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Direct solver for the reduced system
    pub solver: LinearSolver,
    /// Elements shorter than this are degenerate
    pub zero_length_tolerance: f64,
    /// Smallest LU pivot, relative to the largest, before the system counts as singular
    pub pivot_tolerance: f64,
    /// Verify symmetry of the assembled stiffness matrix
    pub check_symmetry: bool,
    /// Absolute tolerance for the symmetry check
    pub symmetry_tolerance: f64,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: LinearSolver::Lu,
            zero_length_tolerance: 1e-8,
            pivot_tolerance: 1e-12,
            check_symmetry: true,
            symmetry_tolerance: 1e-9,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Default options with the Cholesky solver
    pub fn cholesky() -> Self {
        Self {
            solver: LinearSolver::Cholesky,
            ..Self::default()
        }
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the degenerate element length tolerance
    pub fn with_zero_length_tolerance(mut self, tol: f64) -> Self {
        self.zero_length_tolerance = tol;
        self
    }

    /// Set the relative pivot tolerance
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }
}

/// Assemble, apply Dirichlet conditions and solve a preprocessed model
///
/// The returned solution carries the unconstrained K and F.
pub fn solve(model: &PreprocessedModel, options: &AnalysisOptions) -> BarResult<Solution> {
    let system = assembly::assemble(model, options)?;
    let (k_bc, f_bc) = apply_dirichlet(&system.stiffness, &system.load, &model.dofs);

    let displacements = match options.solver {
        LinearSolver::Lu => math::solve_linear_system(&k_bc, &f_bc, options.pivot_tolerance),
        LinearSolver::Cholesky => math::solve_cholesky(&k_bc, &f_bc),
    }
    .ok_or(BarError::SingularMatrix)?;

    if options.log {
        info!(
            "Solved {} dofs ({} prescribed) with {:?}",
            model.num_dofs(),
            model.dofs.num_dirichlet(),
            options.solver
        );
    }

    Ok(Solution {
        displacements,
        stiffness: system.stiffness,
        load: system.load,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{BlockElements, ElementBlock, Material};
    use crate::loads::{BoundaryCondition, ConcentratedLoad};
    use crate::model::BarModel;
    use crate::preprocess::preprocess;
    use approx::assert_relative_eq;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    /// Records the level of every log call, keyed by the calling test thread
    struct CaptureLogger {
        records: Mutex<Vec<(ThreadId, Level)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push((thread::current().id(), record.level()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };
    static INIT_LOGGER: Once = Once::new();

    fn info_records_on_this_thread() -> usize {
        INIT_LOGGER.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
        });
        let id = thread::current().id();
        LOGGER
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, level)| *t == id && *level == Level::Info)
            .count()
    }

    fn cantilever(fixed: bool) -> PreprocessedModel {
        let mut model = BarModel::uniform(3.0, 3);
        model
            .add_material(Material::elastic("mat", 10.0, 0.3).unwrap())
            .add_block(ElementBlock::new("block", "mat", BlockElements::all()))
            .add_cload(ConcentratedLoad::at_node(3, 1.0));
        if fixed {
            model.add_boundary(BoundaryCondition::fixed(0));
        }
        preprocess(&model).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = AnalysisOptions::default();
        assert_eq!(options.solver, LinearSolver::Lu);
        assert!(options.check_symmetry);
        assert!(!options.log);
        assert_eq!(AnalysisOptions::cholesky().solver, LinearSolver::Cholesky);
    }

    #[test]
    fn test_option_builders() {
        let options = AnalysisOptions::default()
            .with_logging()
            .with_pivot_tolerance(1e-14)
            .with_zero_length_tolerance(1e-6);
        assert!(options.log);
        assert_eq!(options.pivot_tolerance, 1e-14);
        assert_eq!(options.zero_length_tolerance, 1e-6);
        assert_eq!(options.solver, LinearSolver::Lu);
    }

    #[test]
    fn test_info_logging_follows_log_option() {
        let start = info_records_on_this_thread();
        let model = cantilever(true);
        solve(&model, &AnalysisOptions::default()).unwrap();
        assert_eq!(info_records_on_this_thread(), start);

        solve(&model, &AnalysisOptions::default().with_logging()).unwrap();
        // assembly and solve summaries
        assert_eq!(info_records_on_this_thread(), start + 2);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"solver": "cholesky", "log": true}"#).unwrap();
        assert_eq!(options.solver, LinearSolver::Cholesky);
        assert!(options.log);
        assert_eq!(options.zero_length_tolerance, 1e-8);
    }

    #[test]
    fn test_lu_and_cholesky_agree() {
        let model = cantilever(true);
        let lu = solve(&model, &AnalysisOptions::default()).unwrap();
        let chol = solve(&model, &AnalysisOptions::cholesky()).unwrap();
        for i in 0..4 {
            assert_relative_eq!(lu.displacements[i], chol.displacements[i], epsilon = 1e-12);
        }
        assert_relative_eq!(lu.displacements[3], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_unconstrained_bar_is_singular() {
        let model = cantilever(false);
        assert!(matches!(
            solve(&model, &AnalysisOptions::default()),
            Err(BarError::SingularMatrix)
        ));
        assert!(matches!(
            solve(&model, &AnalysisOptions::cholesky()),
            Err(BarError::SingularMatrix)
        ));
    }
}
