//! Monitoring points: locations where a variable is sampled during a solve.

use std::fmt;
use std::path::{Path, PathBuf};

use rhea_codec::{CodecError, Decoder, Encoder};
use rhea_core::VariableKind;

/// A sampled variable at a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitoringPoint {
    /// Variable being sampled.
    pub variable: VariableKind,
    /// Position in model coordinates.
    pub position: [f64; 3],
    /// File receiving the samples.
    pub output_file_name: PathBuf,
}

impl MonitoringPoint {
    /// A point sampling `variable` at `position` with no output file.
    pub fn new(variable: VariableKind, position: [f64; 3]) -> Self {
        Self {
            variable,
            position,
            output_file_name: PathBuf::new(),
        }
    }

    fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_str(self.variable.id())?;
        for c in self.position {
            enc.write_f64(c)?;
        }
        enc.write_str(&self.output_file_name.to_string_lossy())
    }

    fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let id = dec.read_str()?;
        let variable = VariableKind::from_id(&id).ok_or_else(|| CodecError::Malformed {
            detail: format!("unknown monitored variable '{id}'"),
        })?;
        let position = [dec.read_f64()?, dec.read_f64()?, dec.read_f64()?];
        Ok(Self {
            variable,
            position,
            output_file_name: PathBuf::from(dec.read_str()?),
        })
    }
}

impl fmt::Display for MonitoringPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        write!(f, "{} @ [{x}, {y}, {z}]", self.variable.name())
    }
}

/// The monitoring points of a problem.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonitoringPointManager {
    points: Vec<MonitoringPoint>,
}

impl MonitoringPointManager {
    /// No points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MonitoringPoint> {
        self.points.iter()
    }

    /// Point at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&MonitoringPoint> {
        self.points.get(position)
    }

    /// Mutable point at `position`, if any.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut MonitoringPoint> {
        self.points.get_mut(position)
    }

    /// Append a point.
    pub fn push(&mut self, point: MonitoringPoint) {
        self.points.push(point);
    }

    /// Remove and return the point at `position`, if any.
    pub fn remove(&mut self, position: usize) -> Option<MonitoringPoint> {
        (position < self.points.len()).then(|| self.points.remove(position))
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Point every monitoring point at the same output file.
    pub fn set_output_file_name(&mut self, path: &Path) {
        for point in &mut self.points {
            point.output_file_name = path.to_path_buf();
        }
    }

    pub(crate) fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_len(self.points.len())?;
        self.points.iter().try_for_each(|p| p.encode(enc))
    }

    pub(crate) fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let n = dec.read_len()?;
        let points = (0..n)
            .map(|_| MonitoringPoint::decode(dec))
            .collect::<Result<_, _>>()?;
        Ok(Self { points })
    }
}

impl<'a> IntoIterator for &'a MonitoringPointManager {
    type Item = &'a MonitoringPoint;
    type IntoIter = std::slice::Iter<'a, MonitoringPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<MonitoringPoint> for MonitoringPointManager {
    fn from_iter<I: IntoIterator<Item = MonitoringPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_reaches_every_point() {
        let mut manager: MonitoringPointManager = [
            MonitoringPoint::new(VariableKind::Temperature, [0.0, 0.0, 0.0]),
            MonitoringPoint::new(VariableKind::Pressure, [1.0, 0.0, 0.0]),
        ]
        .into_iter()
        .collect();
        manager.set_output_file_name(Path::new("out/monitor.txt"));
        assert!(manager
            .iter()
            .all(|p| p.output_file_name == Path::new("out/monitor.txt")));
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut manager = MonitoringPointManager::new();
        assert!(manager.remove(0).is_none());
        manager.push(MonitoringPoint::new(VariableKind::Velocity, [0.0; 3]));
        assert!(manager.remove(0).is_some());
        assert!(manager.is_empty());
    }

    #[test]
    fn display_names_variable() {
        let p = MonitoringPoint::new(VariableKind::Temperature, [1.0, 2.5, 0.0]);
        assert_eq!(p.to_string(), "Temperature @ [1, 2.5, 0]");
    }
}
