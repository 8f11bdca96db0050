//! Linear matrix solver configurations.

use std::fmt;
use std::path::PathBuf;

use rhea_codec::{CodecError, Decoder, Encoder};

/// Iterative linear solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatrixSolverKind {
    /// Conjugate gradient.
    Cg,
    /// Generalized minimal residual.
    Gmres,
    /// Biconjugate gradient stabilized.
    BiCgStab,
}

impl MatrixSolverKind {
    /// Every solver kind.
    pub const ALL: [MatrixSolverKind; 3] = [
        MatrixSolverKind::Cg,
        MatrixSolverKind::Gmres,
        MatrixSolverKind::BiCgStab,
    ];

    /// Kinds every problem carries a configuration for.
    pub const DEFAULTS: [MatrixSolverKind; 2] = [MatrixSolverKind::Cg, MatrixSolverKind::Gmres];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cg => "cg",
            Self::Gmres => "gmres",
            Self::BiCgStab => "bicgstab",
        }
    }

    /// Look up a kind by identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cg => "Conjugate gradient (CG)",
            Self::Gmres => "Generalized minimal residual (GMRES)",
            Self::BiCgStab => "Biconjugate gradient stabilized (BiCGStab)",
        }
    }
}

impl fmt::Display for MatrixSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings of one matrix solver.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixSolverConfig {
    /// Solver this configuration applies to.
    pub kind: MatrixSolverKind,
    /// Maximum number of inner iterations. Default: 1000.
    pub max_iterations: u32,
    /// Residual norm at which the solver stops. Default: 1e-5.
    pub convergence: f64,
    /// Convergence history is written every this many iterations. Default: 1.
    pub output_frequency: u32,
    /// File receiving the convergence history; empty for none.
    pub output_file_name: PathBuf,
}

impl MatrixSolverConfig {
    /// Default settings for `kind`.
    pub fn new(kind: MatrixSolverKind) -> Self {
        Self {
            kind,
            max_iterations: 1000,
            convergence: 1e-5,
            output_frequency: 1,
            output_file_name: PathBuf::new(),
        }
    }

    pub(crate) fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_str(self.kind.id())?;
        enc.write_u32(self.max_iterations)?;
        enc.write_f64(self.convergence)?;
        enc.write_u32(self.output_frequency)?;
        enc.write_str(&self.output_file_name.to_string_lossy())
    }

    pub(crate) fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let id = dec.read_str()?;
        let kind = MatrixSolverKind::from_id(&id).ok_or_else(|| CodecError::Malformed {
            detail: format!("unknown matrix solver '{id}'"),
        })?;
        Ok(Self {
            kind,
            max_iterations: dec.read_u32()?,
            convergence: dec.read_f64()?,
            output_frequency: dec.read_u32()?,
            output_file_name: PathBuf::from(dec.read_str()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_resolve() {
        for kind in MatrixSolverKind::ALL {
            assert_eq!(MatrixSolverKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(MatrixSolverKind::from_id("lu"), None);
    }

    #[test]
    fn new_uses_kind() {
        let config = MatrixSolverConfig::new(MatrixSolverKind::BiCgStab);
        assert_eq!(config.kind, MatrixSolverKind::BiCgStab);
        assert_eq!(config.max_iterations, 1000);
    }
}
