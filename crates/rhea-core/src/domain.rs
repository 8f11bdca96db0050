//! Physics domains, their static descriptors, and the [`DomainMask`] set.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// A physics discipline that can be toggled on or off in a composed simulation.
///
/// Declaration order is significant: it is the iteration order of
/// [`DomainMask`] and the order in which registry queries report domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Domain {
    /// Customized wave equation for acoustic problems.
    Acoustics = 0,
    /// Contaminant dispersion in a flow field.
    Contaminant,
    /// Electric field, current density and Joule heat.
    Electrostatics,
    /// Magnetic field.
    Magnetostatics,
    /// Incompressible viscous flow.
    Fluid,
    /// Heat transfer in fluids.
    FluidHeat,
    /// Conductive heat transfer.
    Heat,
    /// Radiative heat transfer.
    RadiativeHeat,
    /// Stress and linear elasto-dynamics.
    Stress,
    /// Stress modal analysis.
    StressModal,
    /// Flow through porous media.
    Potential,
    /// General wave equation.
    Wave,
    /// Mesh reconstruction.
    Mesh,
}

impl Domain {
    /// Number of defined domains.
    pub const COUNT: usize = 13;

    /// Every domain, in declaration order.
    pub const ALL: [Domain; Domain::COUNT] = [
        Domain::Acoustics,
        Domain::Contaminant,
        Domain::Electrostatics,
        Domain::Magnetostatics,
        Domain::Fluid,
        Domain::FluidHeat,
        Domain::Heat,
        Domain::RadiativeHeat,
        Domain::Stress,
        Domain::StressModal,
        Domain::Potential,
        Domain::Wave,
        Domain::Mesh,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }

    /// Static descriptor for this domain.
    pub fn descriptor(self) -> &'static DomainDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Stable string identifier (e.g. `"prb-heat"`).
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        self.descriptor().description
    }

    /// Domains that must be active whenever this one is.
    pub fn required(self) -> DomainMask {
        self.descriptor().required
    }

    /// Domains that may not be combined with this one.
    pub fn excluded(self) -> DomainMask {
        self.descriptor().excluded
    }

    /// Whether this domain can run under the time-march solver.
    pub fn time_march_eligible(self) -> bool {
        self.descriptor().time_march
    }

    /// Look up a domain by its string identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        DESCRIPTORS.iter().find(|d| d.id == id).map(|d| d.domain)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Immutable reference data describing one [`Domain`].
#[derive(Debug)]
pub struct DomainDescriptor {
    /// The described domain.
    pub domain: Domain,
    /// Stable string identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Domains that must be active alongside this one.
    pub required: DomainMask,
    /// Domains that cannot be active alongside this one.
    pub excluded: DomainMask,
    /// Time-march eligibility.
    pub time_march: bool,
}

use Domain::*;

static DESCRIPTORS: [DomainDescriptor; Domain::COUNT] = [
    DomainDescriptor {
        domain: Acoustics,
        id: "prb-acoustics",
        name: "Acoustics",
        description: "Customized wave equation for solving acoustic problems.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[Wave, StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Contaminant,
        id: "prb-contaminant",
        name: "Contaminant dispersion",
        description: "Calculate distribution of contaminant in the flow field.",
        required: DomainMask::of(&[Fluid]),
        excluded: DomainMask::of(&[StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Electrostatics,
        id: "prb-electrostatics",
        name: "Electro-statics",
        description: "Calculate electric field, current density and generated Joule's heat.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[StressModal]),
        time_march: false,
    },
    DomainDescriptor {
        domain: Magnetostatics,
        id: "prb-magnetostatics",
        name: "Magneto-statics",
        description: "Calculate magnetic field.",
        required: DomainMask::of(&[Electrostatics]),
        excluded: DomainMask::of(&[StressModal]),
        time_march: false,
    },
    DomainDescriptor {
        domain: Fluid,
        id: "prb-fluid",
        name: "Incompressible viscous flow",
        description: "Steady-state and transient flow of newtonian fluids.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[Potential, StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: FluidHeat,
        id: "prb-fluid-heat",
        name: "Heat transfer in fluids",
        description: "Heat transfer in fluids.",
        required: DomainMask::of(&[Fluid]),
        excluded: DomainMask::of(&[StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Heat,
        id: "prb-heat",
        name: "Heat transfer",
        description: "Steady-state and transient heat transfer.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: RadiativeHeat,
        id: "prb-radiative_heat",
        name: "Radiative heat transfer",
        description: "Steady-state and transient radiative heat transfer.",
        required: DomainMask::of(&[Heat]),
        excluded: DomainMask::of(&[StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Stress,
        id: "prb-stress",
        name: "Stress analysis",
        description: "Stress and linear elasto-dynamics analysis including modal analysis.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::EMPTY,
        time_march: true,
    },
    DomainDescriptor {
        domain: StressModal,
        id: "prb-stress-modal",
        name: "Modal analysis",
        description: "Stress modal analysis.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::ALL.difference(DomainMask::of(&[Stress, StressModal, Mesh])),
        time_march: false,
    },
    DomainDescriptor {
        domain: Potential,
        id: "prb-potential",
        name: "Flow through porous media",
        description: "Flow through porous media.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[Fluid, StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Wave,
        id: "prb-wave",
        name: "Wave - general",
        description: "Solve general wave equation for wave displacements.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::of(&[Acoustics, StressModal]),
        time_march: true,
    },
    DomainDescriptor {
        domain: Mesh,
        id: "prb-mesh",
        name: "Mesh reconstruction",
        description: "Reconstruct mesh based on provided criteria.",
        required: DomainMask::EMPTY,
        excluded: DomainMask::EMPTY,
        time_march: false,
    },
];

/// A set of [`Domain`]s backed by a fixed-width bitset.
///
/// Only bits for defined domains can ever be set: masks are built from
/// `Domain` values, and [`from_bits`](DomainMask::from_bits) rejects
/// undefined bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DomainMask {
    bits: u16,
}

impl DomainMask {
    const VALID_BITS: u16 = (1 << Domain::COUNT) - 1;

    /// The empty set.
    pub const EMPTY: DomainMask = DomainMask { bits: 0 };

    /// The set of every defined domain.
    pub const ALL: DomainMask = DomainMask {
        bits: Self::VALID_BITS,
    };

    /// Create an empty set.
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Build a set from a list of domains.
    pub const fn of(domains: &[Domain]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < domains.len() {
            bits |= domains[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// A set holding exactly one domain.
    pub const fn single(domain: Domain) -> Self {
        Self { bits: domain.bit() }
    }

    /// Rebuild a set from its raw bit representation.
    ///
    /// Returns `None` if any bit outside the defined domains is set.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::VALID_BITS != 0 {
            None
        } else {
            Some(Self { bits })
        }
    }

    /// Raw bit representation, bit `n` being the `n`-th declared domain.
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Insert a domain. Returns `true` if it was not already present.
    pub fn insert(&mut self, domain: Domain) -> bool {
        let absent = !self.contains(domain);
        self.bits |= domain.bit();
        absent
    }

    /// Remove a domain. Returns `true` if it was present.
    pub fn remove(&mut self, domain: Domain) -> bool {
        let present = self.contains(domain);
        self.bits &= !domain.bit();
        present
    }

    /// Check whether the set contains a domain.
    pub const fn contains(self, domain: Domain) -> bool {
        self.bits & domain.bit() != 0
    }

    /// Return the union of two sets (`self | other`).
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Return the intersection of two sets (`self & other`).
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Return the set difference (`self - other`).
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Whether the two sets share at least one domain.
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Check whether `self` is a subset of `other`.
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns `true` if the set contains no domains.
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of domains in the set.
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the domains in the set, in declaration order.
    pub fn iter(self) -> DomainMaskIter {
        DomainMaskIter { bits: self.bits }
    }
}

impl fmt::Debug for DomainMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<Domain> for DomainMask {
    fn from(domain: Domain) -> Self {
        Self::single(domain)
    }
}

impl BitOr for DomainMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for DomainMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for DomainMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for DomainMask {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl FromIterator<Domain> for DomainMask {
    fn from_iter<I: IntoIterator<Item = Domain>>(iter: I) -> Self {
        let mut mask = Self::empty();
        for domain in iter {
            mask.insert(domain);
        }
        mask
    }
}

impl IntoIterator for DomainMask {
    type Item = Domain;
    type IntoIter = DomainMaskIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the domains in a [`DomainMask`], in declaration order.
#[derive(Clone, Debug)]
pub struct DomainMaskIter {
    bits: u16,
}

impl Iterator for DomainMaskIter {
    type Item = Domain;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(Domain::ALL[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for DomainMaskIter {}
