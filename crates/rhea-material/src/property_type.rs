//! Material property types and the domains that need them.

use std::fmt;

use rhea_core::{Domain, DomainMask, VariableKind};

/// A kind of material property.
///
/// Ordering follows declaration order; materials keep their properties
/// sorted by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PropertyType {
    /// Mass density.
    Density = 0,
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
    /// User-defined property. Never required and never generated by default.
    Custom,
}

struct PropertyTypeDesc {
    id: &'static str,
    variable: VariableKind,
    domains: DomainMask,
}

use Domain as D;

#[rustfmt::skip]
static PROPERTY_TYPES: [PropertyTypeDesc; PropertyType::COUNT] = [
    PropertyTypeDesc {
        id: "prop-density",
        variable: VariableKind::Density,
        domains: DomainMask::of(&[
            D::Acoustics, D::Contaminant, D::Electrostatics, D::Fluid, D::FluidHeat,
            D::Heat, D::Stress, D::StressModal, D::Potential, D::Wave,
        ]),
    },
    PropertyTypeDesc { id: "prop-dynamic_viscosity", variable: VariableKind::DynamicViscosity, domains: DomainMask::of(&[D::Fluid, D::FluidHeat]) },
    PropertyTypeDesc { id: "prop-electrical_conductivity", variable: VariableKind::ElectricalConductivity, domains: DomainMask::of(&[D::Electrostatics]) },
    PropertyTypeDesc { id: "prop-emissivity", variable: VariableKind::Emissivity, domains: DomainMask::of(&[D::Heat]) },
    PropertyTypeDesc { id: "prop-heat_capacity", variable: VariableKind::HeatCapacity, domains: DomainMask::of(&[D::Heat, D::FluidHeat]) },
    PropertyTypeDesc { id: "prop-modulus_of_elasticity", variable: VariableKind::ModulusOfElasticity, domains: DomainMask::of(&[D::Acoustics, D::Stress, D::StressModal]) },
    PropertyTypeDesc { id: "prop-permeability_to_fluids", variable: VariableKind::PermeabilityToFluids, domains: DomainMask::of(&[D::Potential]) },
    PropertyTypeDesc { id: "prop-poisson_ratio", variable: VariableKind::PoissonRatio, domains: DomainMask::of(&[D::Stress, D::StressModal]) },
    PropertyTypeDesc { id: "prop-relative_permittivity", variable: VariableKind::RelativePermittivity, domains: DomainMask::of(&[D::Electrostatics]) },
    PropertyTypeDesc { id: "prop-sound_speed", variable: VariableKind::SoundSpeed, domains: DomainMask::EMPTY },
    PropertyTypeDesc { id: "prop-thermal_conductivity", variable: VariableKind::ThermalConductivity, domains: DomainMask::of(&[D::Heat, D::FluidHeat]) },
    PropertyTypeDesc { id: "prop-thermal_expansion_coefficient", variable: VariableKind::ThermalExpansionCoefficient, domains: DomainMask::of(&[D::Stress, D::StressModal]) },
    PropertyTypeDesc { id: "prop-custom", variable: VariableKind::Custom, domains: DomainMask::EMPTY },
];

impl PropertyType {
    /// Number of defined property types.
    pub const COUNT: usize = 13;

    /// Every property type, in declaration order.
    pub const ALL: [PropertyType; PropertyType::COUNT] = [
        PropertyType::Density,
        PropertyType::DynamicViscosity,
        PropertyType::ElectricalConductivity,
        PropertyType::Emissivity,
        PropertyType::HeatCapacity,
        PropertyType::ModulusOfElasticity,
        PropertyType::PermeabilityToFluids,
        PropertyType::PoissonRatio,
        PropertyType::RelativePermittivity,
        PropertyType::SoundSpeed,
        PropertyType::ThermalConductivity,
        PropertyType::ThermalExpansionCoefficient,
        PropertyType::Custom,
    ];

    fn desc(self) -> &'static PropertyTypeDesc {
        &PROPERTY_TYPES[self as usize]
    }

    /// Stable string identifier (e.g. `"prop-density"`).
    pub fn id(self) -> &'static str {
        self.desc().id
    }

    /// Look up a property type by its string identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Physical variable this property describes.
    pub fn variable(self) -> VariableKind {
        self.desc().variable
    }

    /// Domains that need this property.
    pub fn domains(self) -> DomainMask {
        self.desc().domains
    }

    /// Display name, taken from the variable registry.
    pub fn name(self) -> &'static str {
        self.variable().name()
    }

    /// Units, taken from the variable registry.
    pub fn units(self) -> &'static str {
        self.variable().units()
    }

    /// Initial value, taken from the variable registry.
    pub fn init_value(self) -> f64 {
        self.variable().init_value()
    }

    /// Property types needed by any domain in `mask`, in declaration order.
    pub fn required_for(mask: DomainMask) -> Vec<PropertyType> {
        Self::ALL
            .into_iter()
            .filter(|t| t.domains().intersects(mask))
            .collect()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_declaration_order() {
        for (i, t) in PropertyType::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
            assert_eq!(PropertyType::from_id(t.id()), Some(*t));
        }
        assert_eq!(PropertyType::from_id("prop-none"), None);
    }

    #[test]
    fn required_for_fluid() {
        assert_eq!(
            PropertyType::required_for(DomainMask::single(Domain::Fluid)),
            vec![PropertyType::Density, PropertyType::DynamicViscosity]
        );
    }

    #[test]
    fn required_for_unions_domains() {
        let types =
            PropertyType::required_for(DomainMask::of(&[Domain::Heat, Domain::Electrostatics]));
        assert_eq!(
            types,
            vec![
                PropertyType::Density,
                PropertyType::ElectricalConductivity,
                PropertyType::Emissivity,
                PropertyType::HeatCapacity,
                PropertyType::RelativePermittivity,
                PropertyType::ThermalConductivity,
            ]
        );
    }

    #[test]
    fn mesh_needs_no_properties() {
        assert!(PropertyType::required_for(DomainMask::single(Domain::Mesh)).is_empty());
        assert!(PropertyType::required_for(DomainMask::EMPTY).is_empty());
    }

    #[test]
    fn names_come_from_variables() {
        assert_eq!(PropertyType::Density.name(), VariableKind::Density.name());
        assert_eq!(PropertyType::Density.init_value(), VariableKind::Density.init_value());
    }
}
