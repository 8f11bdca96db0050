//! Sample materials and problems.
//!
//! - [`water`]: liquid, valid for fluid flow and heat transfer in fluids.
//! - [`steel`]: solid, valid for stress and heat transfer.
//! - [`density_only`]: a single Density property.
//! - [`heat_problem`]: transient heat transfer with one monitoring point.

use std::path::Path;

use rhea_core::{Domain, DomainMask, VariableKind};
use rhea_material::{Material, MaterialProperty, MaterialState, PropertyType};
use rhea_problem::{
    MarchApproximation, MatrixSolverConfig, MatrixSolverKind, MonitoringPoint, Problem, TaskTree,
};

fn tabulated(kind: PropertyType, samples: &[(f64, f64)]) -> MaterialProperty {
    MaterialProperty::with_samples(kind, samples.iter().copied())
}

pub fn water() -> Material {
    let mut m = Material::new();
    m.set_name("Water");
    m.set_state(MaterialState::Liquid);
    m.add(tabulated(
        PropertyType::Density,
        &[(273.15, 999.8), (293.15, 998.2), (353.15, 971.8)],
    ));
    m.add(tabulated(
        PropertyType::DynamicViscosity,
        &[(273.15, 1.79e-3), (293.15, 1.0e-3), (353.15, 3.5e-4)],
    ));
    m.add(tabulated(PropertyType::HeatCapacity, &[(293.15, 4182.0)]));
    m.add(tabulated(PropertyType::ThermalConductivity, &[(293.15, 0.598)]));
    m
}

pub fn steel() -> Material {
    let mut m = Material::new();
    m.set_name("Steel");
    m.set_state(MaterialState::Solid);
    m.add(tabulated(PropertyType::Density, &[(293.15, 7850.0)]));
    m.add(tabulated(PropertyType::Emissivity, &[(293.15, 0.3)]));
    m.add(tabulated(PropertyType::HeatCapacity, &[(293.15, 490.0), (773.15, 620.0)]));
    m.add(tabulated(PropertyType::ModulusOfElasticity, &[(293.15, 2.1e11)]));
    m.add(tabulated(PropertyType::PoissonRatio, &[(293.15, 0.29)]));
    m.add(tabulated(PropertyType::ThermalConductivity, &[(293.15, 50.0), (773.15, 35.0)]));
    m.add(tabulated(PropertyType::ThermalExpansionCoefficient, &[(293.15, 1.2e-5)]));
    m
}

pub fn density_only() -> Material {
    let mut m = Material::new();
    m.set_name("Density only");
    m.add(MaterialProperty::new(PropertyType::Density));
    m
}

pub fn heat_problem() -> Problem {
    let mut p = Problem::new();
    p.set_domains(DomainMask::single(Domain::Heat))
        .expect("heat alone is a valid composition");
    let ts = p.time_solver_mut();
    ts.set_enabled(true);
    ts.set_approximation(MarchApproximation::Backward);
    ts.set_input_start_time(0.0);
    ts.set_input_step_size(0.25);
    ts.set_input_step_count(8);
    ts.harmonize(false);
    p.set_task_tree(TaskTree::from_bytes(b"<task id=\"solve\"/>".to_vec()));
    p.monitoring_points_mut()
        .push(MonitoringPoint::new(VariableKind::Temperature, [0.1, 0.2, 0.3]));
    p.set_output_file_name(Path::new("monitor-heat.txt"));
    let mut gmres = MatrixSolverConfig::new(MatrixSolverKind::Gmres);
    gmres.max_iterations = 250;
    gmres.convergence = 1e-8;
    p.register_solver_config(gmres);
    p.setup_mut().modal.iterations = 20;
    p.setup_mut().mesh.variables.insert(VariableKind::Temperature);
    p.setup_mut().mesh.max_edge_length = 0.05;
    p
}
