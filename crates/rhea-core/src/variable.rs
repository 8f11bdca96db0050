//! Physical variable registry.
//!
//! Every quantity the engine talks about (material inputs such as density,
//! solver results such as velocity) is a [`VariableKind`] with a name, units,
//! an initial value, and the set of domains that produce it as a result.

use std::fmt;

use crate::domain::{Domain, DomainMask};

/// A kind of physical variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum VariableKind {
    /// Absolute temperature. The usual independent variable of material tables.
    Temperature = 0,
    /// Mass density.
    Density,
    /// Dynamic viscosity.
    DynamicViscosity,
    /// Electrical conductivity.
    ElectricalConductivity,
    /// Surface emissivity.
    Emissivity,
    /// Specific heat capacity.
    HeatCapacity,
    /// Young's modulus.
    ModulusOfElasticity,
    /// Permeability to fluids.
    PermeabilityToFluids,
    /// Poisson's ratio.
    PoissonRatio,
    /// Relative permittivity.
    RelativePermittivity,
    /// Speed of sound.
    SoundSpeed,
    /// Thermal conductivity.
    ThermalConductivity,
    /// Linear thermal expansion coefficient.
    ThermalExpansionCoefficient,
    /// Flow velocity.
    Velocity,
    /// Fluid pressure.
    Pressure,
    /// Structural displacement.
    Displacement,
    /// Equivalent (von Mises) stress.
    Stress,
    /// Electric potential.
    ElectricPotential,
    /// Electric field strength.
    ElectricField,
    /// Electric current density.
    CurrentDensity,
    /// Generated Joule heat.
    JouleHeat,
    /// Magnetic flux density.
    MagneticField,
    /// Heat flux.
    HeatFlux,
    /// Acoustic pressure.
    AcousticPressure,
    /// Wave displacement.
    WaveDisplacement,
    /// Contaminant concentration.
    Concentration,
    /// Target mesh element size.
    MeshSize,
    /// User-defined quantity.
    Custom,
}

struct VariableDesc {
    id: &'static str,
    name: &'static str,
    units: &'static str,
    init_value: f64,
    produced_by: DomainMask,
}

use Domain as D;

#[rustfmt::skip]
static VARIABLES: [VariableDesc; VariableKind::COUNT] = [
    VariableDesc { id: "var-temperature", name: "Temperature", units: "K", init_value: 293.15, produced_by: DomainMask::of(&[D::FluidHeat, D::Heat, D::RadiativeHeat]) },
    VariableDesc { id: "var-density", name: "Density", units: "kg/m^3", init_value: 1000.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-dynamic_viscosity", name: "Dynamic viscosity", units: "Pa*s", init_value: 0.001, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-electrical_conductivity", name: "Electrical conductivity", units: "S/m", init_value: 0.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-emissivity", name: "Emissivity", units: "", init_value: 1.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-heat_capacity", name: "Heat capacity", units: "J/(kg*K)", init_value: 4180.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-modulus_of_elasticity", name: "Modulus of elasticity", units: "Pa", init_value: 2.0e11, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-permeability_to_fluids", name: "Permeability to fluids", units: "m^2", init_value: 1.0e-12, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-poisson_ratio", name: "Poisson ratio", units: "", init_value: 0.3, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-relative_permittivity", name: "Relative permittivity", units: "", init_value: 1.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-sound_speed", name: "Speed of sound", units: "m/s", init_value: 343.0, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-thermal_conductivity", name: "Thermal conductivity", units: "W/(m*K)", init_value: 0.6, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-thermal_expansion_coefficient", name: "Thermal expansion coefficient", units: "1/K", init_value: 1.2e-5, produced_by: DomainMask::EMPTY },
    VariableDesc { id: "var-velocity", name: "Velocity", units: "m/s", init_value: 0.0, produced_by: DomainMask::of(&[D::Fluid, D::Potential]) },
    VariableDesc { id: "var-pressure", name: "Pressure", units: "Pa", init_value: 0.0, produced_by: DomainMask::of(&[D::Fluid, D::Potential]) },
    VariableDesc { id: "var-displacement", name: "Displacement", units: "m", init_value: 0.0, produced_by: DomainMask::of(&[D::Stress, D::StressModal]) },
    VariableDesc { id: "var-stress", name: "Stress", units: "Pa", init_value: 0.0, produced_by: DomainMask::of(&[D::Stress, D::StressModal]) },
    VariableDesc { id: "var-electric_potential", name: "Electric potential", units: "V", init_value: 0.0, produced_by: DomainMask::of(&[D::Electrostatics]) },
    VariableDesc { id: "var-electric_field", name: "Electric field", units: "V/m", init_value: 0.0, produced_by: DomainMask::of(&[D::Electrostatics]) },
    VariableDesc { id: "var-current_density", name: "Current density", units: "A/m^2", init_value: 0.0, produced_by: DomainMask::of(&[D::Electrostatics]) },
    VariableDesc { id: "var-joule_heat", name: "Joule heat", units: "W/m^3", init_value: 0.0, produced_by: DomainMask::of(&[D::Electrostatics]) },
    VariableDesc { id: "var-magnetic_field", name: "Magnetic field", units: "T", init_value: 0.0, produced_by: DomainMask::of(&[D::Magnetostatics]) },
    VariableDesc { id: "var-heat_flux", name: "Heat flux", units: "W/m^2", init_value: 0.0, produced_by: DomainMask::of(&[D::FluidHeat, D::Heat, D::RadiativeHeat]) },
    VariableDesc { id: "var-acoustic_pressure", name: "Acoustic pressure", units: "Pa", init_value: 0.0, produced_by: DomainMask::of(&[D::Acoustics]) },
    VariableDesc { id: "var-wave_displacement", name: "Wave displacement", units: "m", init_value: 0.0, produced_by: DomainMask::of(&[D::Wave]) },
    VariableDesc { id: "var-concentration", name: "Concentration", units: "kg/m^3", init_value: 0.0, produced_by: DomainMask::of(&[D::Contaminant]) },
    VariableDesc { id: "var-mesh_size", name: "Mesh size", units: "m", init_value: 0.0, produced_by: DomainMask::of(&[D::Mesh]) },
    VariableDesc { id: "var-custom", name: "Custom", units: "", init_value: 0.0, produced_by: DomainMask::EMPTY },
];

impl VariableKind {
    /// Number of defined variable kinds.
    pub const COUNT: usize = 28;

    /// Every variable kind, in declaration order.
    pub const ALL: [VariableKind; VariableKind::COUNT] = [
        VariableKind::Temperature,
        VariableKind::Density,
        VariableKind::DynamicViscosity,
        VariableKind::ElectricalConductivity,
        VariableKind::Emissivity,
        VariableKind::HeatCapacity,
        VariableKind::ModulusOfElasticity,
        VariableKind::PermeabilityToFluids,
        VariableKind::PoissonRatio,
        VariableKind::RelativePermittivity,
        VariableKind::SoundSpeed,
        VariableKind::ThermalConductivity,
        VariableKind::ThermalExpansionCoefficient,
        VariableKind::Velocity,
        VariableKind::Pressure,
        VariableKind::Displacement,
        VariableKind::Stress,
        VariableKind::ElectricPotential,
        VariableKind::ElectricField,
        VariableKind::CurrentDensity,
        VariableKind::JouleHeat,
        VariableKind::MagneticField,
        VariableKind::HeatFlux,
        VariableKind::AcousticPressure,
        VariableKind::WaveDisplacement,
        VariableKind::Concentration,
        VariableKind::MeshSize,
        VariableKind::Custom,
    ];

    fn desc(self) -> &'static VariableDesc {
        &VARIABLES[self as usize]
    }

    /// Stable string identifier (e.g. `"var-temperature"`).
    pub fn id(self) -> &'static str {
        self.desc().id
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.desc().name
    }

    /// Units string; empty for dimensionless quantities.
    pub fn units(self) -> &'static str {
        self.desc().units
    }

    /// Value a freshly created quantity of this kind starts at.
    pub fn init_value(self) -> f64 {
        self.desc().init_value
    }

    /// Domains that produce this variable as a solver result.
    pub fn produced_by(self) -> DomainMask {
        self.desc().produced_by
    }

    /// Look up a variable kind by its string identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.id() == id)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
