//! Problem setup blocks: modal analysis and mesh reconstruction settings.

use std::collections::BTreeSet;
use std::fmt;

use rhea_codec::{CodecError, Decoder, Encoder};
use rhea_core::VariableKind;

/// Eigenmode extraction strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModalMethod {
    /// Extract only the most dominant mode.
    SingleMode,
    /// Extract several modes.
    #[default]
    MultipleModes,
}

impl ModalMethod {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SingleMode => "Only most dominant mode",
            Self::MultipleModes => "Multiple modes",
        }
    }

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::SingleMode),
            1 => Some(Self::MultipleModes),
            _ => None,
        }
    }
}

impl fmt::Display for ModalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modal analysis settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalSetup {
    /// Extraction strategy.
    pub method: ModalMethod,
    /// Iteration limit. Default: 10.
    pub iterations: u32,
    /// Number of modes to extract. Default: 10.
    pub modes_to_extract: u32,
    /// Convergence threshold. Default: 1e-3.
    pub convergence: f64,
    /// Mode currently being processed.
    pub mode: u32,
    /// Frequency of the current mode.
    pub frequency: f64,
}

impl Default for ModalSetup {
    fn default() -> Self {
        Self {
            method: ModalMethod::MultipleModes,
            iterations: 10,
            modes_to_extract: 10,
            convergence: 1e-3,
            mode: 0,
            frequency: 0.0,
        }
    }
}

impl fmt::Display for ModalSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ Modal method: {}, Number of iterations: {}, Number of modes to extract: {}, \
             Convergence value: {}, Mode: {}, Frequency: {} }}",
            self.method,
            self.iterations,
            self.modes_to_extract,
            self.convergence,
            self.mode,
            self.frequency
        )
    }
}

/// Mesh reconstruction settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSetup {
    /// Variables driving refinement.
    pub variables: BTreeSet<VariableKind>,
    /// Minimum edge length; `0.0` for no limit.
    pub min_edge_length: f64,
    /// Maximum edge length; `0.0` for no limit.
    pub max_edge_length: f64,
}

impl fmt::Display for MeshSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.variables.iter().map(|v| v.name()).collect();
        write!(
            f,
            "{{ Variables: [ {} ], Minimum edge length: {}, Maximum edge length: {} }}",
            names.join(", "),
            self.min_edge_length,
            self.max_edge_length
        )
    }
}

/// Setup shared by every domain of a problem.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemSetup {
    /// Modal analysis settings.
    pub modal: ModalSetup,
    /// Mesh reconstruction settings.
    pub mesh: MeshSetup,
}

impl fmt::Display for ProblemSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ Modal setup: {}, Mesh setup: {} }}", self.modal, self.mesh)
    }
}

impl ProblemSetup {
    pub(crate) fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        let modal = &self.modal;
        enc.write_u8(modal.method.tag())?;
        enc.write_u32(modal.iterations)?;
        enc.write_u32(modal.modes_to_extract)?;
        enc.write_f64(modal.convergence)?;
        enc.write_u32(modal.mode)?;
        enc.write_f64(modal.frequency)?;

        let mesh = &self.mesh;
        enc.write_len(mesh.variables.len())?;
        for v in &mesh.variables {
            enc.write_str(v.id())?;
        }
        enc.write_f64(mesh.min_edge_length)?;
        enc.write_f64(mesh.max_edge_length)
    }

    pub(crate) fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let tag = dec.read_u8()?;
        let method = ModalMethod::from_tag(tag).ok_or_else(|| CodecError::Malformed {
            detail: format!("invalid modal method {tag}"),
        })?;
        let modal = ModalSetup {
            method,
            iterations: dec.read_u32()?,
            modes_to_extract: dec.read_u32()?,
            convergence: dec.read_f64()?,
            mode: dec.read_u32()?,
            frequency: dec.read_f64()?,
        };

        let n = dec.read_len()?;
        let mut variables = BTreeSet::new();
        for _ in 0..n {
            let id = dec.read_str()?;
            let v = VariableKind::from_id(&id).ok_or_else(|| CodecError::Malformed {
                detail: format!("unknown mesh variable '{id}'"),
            })?;
            variables.insert(v);
        }
        let mesh = MeshSetup {
            variables,
            min_edge_length: dec.read_f64()?,
            max_edge_length: dec.read_f64()?,
        };
        Ok(Self { modal, mesh })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_summary() {
        let s = ModalSetup::default().to_string();
        assert!(s.starts_with("{ Modal method: Multiple modes, Number of iterations: 10,"));
        assert!(s.ends_with("Mode: 0, Frequency: 0 }"));
    }

    #[test]
    fn mesh_summary_lists_variables() {
        let mesh = MeshSetup {
            variables: [VariableKind::Temperature, VariableKind::Velocity].into_iter().collect(),
            min_edge_length: 0.5,
            max_edge_length: 2.0,
        };
        assert_eq!(
            mesh.to_string(),
            "{ Variables: [ Temperature, Velocity ], Minimum edge length: 0.5, Maximum edge length: 2 }"
        );
    }

    #[test]
    fn empty_mesh_summary() {
        assert_eq!(
            MeshSetup::default().to_string(),
            "{ Variables: [  ], Minimum edge length: 0, Maximum edge length: 0 }"
        );
    }
}
