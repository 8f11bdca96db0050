//! Benchmark profiles for rhea persistence.
//!
//! - [`dense_material`]: every property type with a long temperature table
//! - [`transient_problem`]: heat transfer with a long time schedule and many probes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rhea_core::{Domain, DomainMask, VariableKind};
use rhea_material::{Material, MaterialProperty, PropertyType};
use rhea_problem::{MonitoringPoint, Problem};

/// A material holding every property type, each with `samples` table
/// entries spread from the default temperature upward in 1 K steps.
pub fn dense_material(samples: usize) -> Material {
    let base = VariableKind::Temperature.init_value();
    let mut material = Material::new();
    material.set_name("Dense benchmark material");
    for kind in PropertyType::ALL {
        let table = (0..samples).map(|i| {
            let t = base + i as f64;
            (t, kind.init_value() * (1.0 + 1e-3 * i as f64))
        });
        material.add(MaterialProperty::with_samples(kind, table));
    }
    material
}

/// A transient heat problem with `steps` time steps and `probes`
/// temperature monitoring points along the x axis.
pub fn transient_problem(steps: usize, probes: usize) -> Problem {
    let mut problem = Problem::new();
    problem.set_domains(DomainMask::single(Domain::Heat)).unwrap();
    let ts = problem.time_solver_mut();
    ts.set_enabled(true);
    ts.set_input_step_size(1e-3);
    ts.set_input_step_count(steps);
    ts.harmonize(false);
    for i in 0..probes {
        problem
            .monitoring_points_mut()
            .push(MonitoringPoint::new(VariableKind::Temperature, [i as f64 * 0.01, 0.0, 0.0]));
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_material_has_every_property() {
        let m = dense_material(16);
        assert_eq!(m.len(), PropertyType::COUNT);
        assert!(m.iter().all(|p| p.table().len() == 16));
    }

    #[test]
    fn transient_problem_schedule() {
        let p = transient_problem(100, 5);
        assert_eq!(p.time_solver().step_count(), 100);
        assert_eq!(p.monitoring_points().len(), 5);
    }
}
