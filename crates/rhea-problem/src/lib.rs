//! Problem configuration for rhea.
//!
//! A [`Problem`] holds the active physics domains, the time-march schedule
//! ([`TimeSolver`]), one configuration per matrix solver kind, monitoring
//! points, a [`ProblemSetup`] and an opaque [`TaskTree`]. It persists as a
//! model file through the rhea codec.
//!
//! Domain composition is enforced here: [`Problem::set_domains`] closes the
//! requested set over required domains and rejects excluded combinations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod matrix_solver;
pub mod monitoring;
pub mod problem;
pub mod setup;
pub mod task_tree;
pub mod time_solver;

pub use matrix_solver::{MatrixSolverConfig, MatrixSolverKind};
pub use monitoring::{MonitoringPoint, MonitoringPointManager};
pub use problem::Problem;
pub use setup::{MeshSetup, ModalMethod, ModalSetup, ProblemSetup};
pub use task_tree::TaskTree;
pub use time_solver::{generate_times, MarchApproximation, TimeSolver};
