//! The problem aggregate: active domains, schedule, solver settings and
//! everything else a solve needs besides the model geometry.

use std::path::Path;

use indexmap::IndexMap;
use rhea_codec::{read_file, write_record, CodecError, Decoder, Encoder, Record};
use rhea_core::{
    close_required, domains_for, sort_by_dependency, time_march_enabled, validate_composition,
    variables_for, DomainError, DomainList, DomainMask, FileKind, RheaError, VariableKind, Version,
};
use rhea_material::PropertyType;
use tracing::debug;

use crate::matrix_solver::{MatrixSolverConfig, MatrixSolverKind};
use crate::monitoring::MonitoringPointManager;
use crate::setup::ProblemSetup;
use crate::task_tree::TaskTree;
use crate::time_solver::TimeSolver;

/// First format version that records monitoring points.
const MONITORING_SINCE: Version = Version::new(1, 1, 0);

/// A configured simulation problem.
///
/// Always holds a configuration for every kind in
/// [`MatrixSolverKind::DEFAULTS`].
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    domains: DomainMask,
    task_tree: TaskTree,
    time_solver: TimeSolver,
    matrix_solvers: IndexMap<MatrixSolverKind, MatrixSolverConfig>,
    monitoring_points: MonitoringPointManager,
    setup: ProblemSetup,
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem {
    /// A problem with no domains and default settings.
    pub fn new() -> Self {
        let matrix_solvers = MatrixSolverKind::DEFAULTS
            .into_iter()
            .map(|kind| (kind, MatrixSolverConfig::new(kind)))
            .collect();
        Self {
            domains: DomainMask::EMPTY,
            task_tree: TaskTree::new(),
            time_solver: TimeSolver::new(),
            matrix_solvers,
            monitoring_points: MonitoringPointManager::new(),
            setup: ProblemSetup::default(),
        }
    }

    /// Active domains.
    pub fn domains(&self) -> DomainMask {
        self.domains
    }

    /// Activate `mask` plus every domain it transitively requires.
    ///
    /// Fails without changing anything if the closed set contains a domain
    /// excluded by another. When the new set cannot be time-marched the time
    /// solver is disabled and reset. Returns the activated set.
    pub fn set_domains(&mut self, mask: DomainMask) -> Result<DomainMask, DomainError> {
        let closed = close_required(mask);
        validate_composition(closed)?;
        self.domains = closed;
        if !time_march_enabled(closed) && self.time_solver.enabled() {
            self.time_solver.set_enabled(false);
            self.time_solver.harmonize(false);
        }
        debug!(domains = ?closed, "problem domains set");
        Ok(closed)
    }

    /// Whether the active domains allow time marching.
    pub fn time_march_allowed(&self) -> bool {
        time_march_enabled(self.domains)
    }

    /// Active domains ordered so that every domain follows those it requires.
    pub fn execution_order(&self) -> Result<DomainList, DomainError> {
        let mut list = domains_for(self.domains);
        sort_by_dependency(&mut list)?;
        Ok(list)
    }

    /// Variables produced by the active domains.
    pub fn required_variables(&self) -> Vec<VariableKind> {
        variables_for(self.domains)
    }

    /// Material property types the active domains need.
    pub fn required_property_types(&self) -> Vec<PropertyType> {
        PropertyType::required_for(self.domains)
    }

    /// Task tree.
    pub fn task_tree(&self) -> &TaskTree {
        &self.task_tree
    }

    /// Replace the task tree.
    pub fn set_task_tree(&mut self, tree: TaskTree) {
        self.task_tree = tree;
    }

    /// Time solver.
    pub fn time_solver(&self) -> &TimeSolver {
        &self.time_solver
    }

    /// Mutable time solver.
    pub fn time_solver_mut(&mut self) -> &mut TimeSolver {
        &mut self.time_solver
    }

    /// Configuration of matrix solver `kind`.
    pub fn solver_config(&self, kind: MatrixSolverKind) -> Result<&MatrixSolverConfig, RheaError> {
        self.matrix_solvers
            .get(&kind)
            .ok_or_else(|| unknown_solver(kind))
    }

    /// Mutable configuration of matrix solver `kind`.
    pub fn solver_config_mut(
        &mut self,
        kind: MatrixSolverKind,
    ) -> Result<&mut MatrixSolverConfig, RheaError> {
        self.matrix_solvers
            .get_mut(&kind)
            .ok_or_else(|| unknown_solver(kind))
    }

    /// Add or replace the configuration for `config.kind`, returning the
    /// replaced one.
    pub fn register_solver_config(
        &mut self,
        config: MatrixSolverConfig,
    ) -> Option<MatrixSolverConfig> {
        self.matrix_solvers.insert(config.kind, config)
    }

    /// Kinds with a registered configuration, in registration order.
    pub fn solver_kinds(&self) -> impl Iterator<Item = MatrixSolverKind> + '_ {
        self.matrix_solvers.keys().copied()
    }

    /// Monitoring points.
    pub fn monitoring_points(&self) -> &MonitoringPointManager {
        &self.monitoring_points
    }

    /// Mutable monitoring points.
    pub fn monitoring_points_mut(&mut self) -> &mut MonitoringPointManager {
        &mut self.monitoring_points
    }

    /// Send every monitoring point's output to `path`.
    pub fn set_output_file_name(&mut self, path: &Path) {
        self.monitoring_points.set_output_file_name(path);
    }

    /// Problem setup.
    pub fn setup(&self) -> &ProblemSetup {
        &self.setup
    }

    /// Mutable problem setup.
    pub fn setup_mut(&mut self) -> &mut ProblemSetup {
        &mut self.setup
    }

    /// Replace the problem setup.
    pub fn set_setup(&mut self, setup: ProblemSetup) {
        self.setup = setup;
    }

    /// Read a problem from a model file. The encoding follows the extension.
    pub fn read(path: &Path) -> Result<Self, RheaError> {
        read_file::<Self>(path).map(|(_, problem)| problem)
    }

    /// Write this problem atomically as a model file.
    pub fn write(&self, path: &Path) -> Result<(), RheaError> {
        write_record(path, self)
    }
}

fn unknown_solver(kind: MatrixSolverKind) -> RheaError {
    RheaError::UnknownSolverKind {
        kind: kind.id().to_string(),
    }
}

impl Record for Problem {
    const KIND: FileKind = FileKind::Model;

    fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_u32(u32::from(self.domains.bits()))?;
        enc.write_bytes(self.task_tree.as_bytes())?;
        self.time_solver.encode(enc)?;
        enc.write_len(self.matrix_solvers.len())?;
        for config in self.matrix_solvers.values() {
            config.encode(enc)?;
        }
        self.monitoring_points.encode(enc)?;
        self.setup.encode(enc)
    }

    fn decode(dec: &mut dyn Decoder, version: Version) -> Result<Self, CodecError> {
        let bits = dec.read_u32()?;
        let domains = u16::try_from(bits)
            .ok()
            .and_then(DomainMask::from_bits)
            .ok_or_else(|| CodecError::Malformed {
                detail: format!("invalid domain mask {bits:#x}"),
            })?;
        let task_tree = TaskTree::from_bytes(dec.read_bytes()?);
        let time_solver = TimeSolver::decode(dec)?;

        let mut problem = Problem::new();
        let n = dec.read_len()?;
        for _ in 0..n {
            problem.register_solver_config(MatrixSolverConfig::decode(dec)?);
        }

        let monitoring_points = if version >= MONITORING_SINCE {
            MonitoringPointManager::decode(dec)?
        } else {
            MonitoringPointManager::new()
        };
        let setup = ProblemSetup::decode(dec)?;

        problem.domains = domains;
        problem.task_tree = task_tree;
        problem.time_solver = time_solver;
        problem.monitoring_points = monitoring_points;
        problem.setup = setup;
        Ok(problem)
    }
}
