//! Derived queries over the static domain descriptors.
//!
//! The descriptor table itself lives in [`crate::domain`]; this module
//! answers composition questions about a [`DomainMask`]: what it requires,
//! what it excludes, which variables it produces, and in which order its
//! domains must run.

use smallvec::SmallVec;

use crate::domain::{Domain, DomainMask};
use crate::error::DomainError;
use crate::variable::VariableKind;

/// Ordered list of domains. Most compositions hold only a handful.
pub type DomainList = SmallVec<[Domain; 8]>;

/// Union of the `required` masks of every domain in `mask`.
///
/// Only direct requirements are included; see [`close_required`] for the
/// transitive closure.
pub fn required_mask(mask: DomainMask) -> DomainMask {
    mask.iter()
        .fold(DomainMask::EMPTY, |acc, d| acc | d.required())
}

/// Union of the `excluded` masks of every domain in `mask`.
///
/// Purely informational: an inconsistent mask is reported, not rejected.
/// Use [`validate_composition`] to enforce.
pub fn excluded_mask(mask: DomainMask) -> DomainMask {
    mask.iter()
        .fold(DomainMask::EMPTY, |acc, d| acc | d.excluded())
}

/// Domains present in `mask`, in declaration order.
pub fn domains_for(mask: DomainMask) -> DomainList {
    mask.iter().collect()
}

/// Smallest superset of `mask` that contains every domain it requires,
/// directly or transitively.
pub fn close_required(mask: DomainMask) -> DomainMask {
    let mut closed = mask;
    loop {
        let next = closed | required_mask(closed);
        if next == closed {
            return closed;
        }
        closed = next;
    }
}

/// Check that no active domain is excluded by another active domain.
///
/// Reports the first offending pair in declaration order of the excluding
/// domain.
pub fn validate_composition(mask: DomainMask) -> Result<(), DomainError> {
    for excluded_by in mask {
        if let Some(domain) = (excluded_by.excluded() & mask).iter().next() {
            return Err(DomainError::ExcludedCombination {
                domain,
                excluded_by,
            });
        }
    }
    Ok(())
}

/// Whether a composition can be marched in time.
///
/// Mesh reconstruction is ignored. An empty mask, or one holding only
/// Mesh, cannot be marched.
pub fn time_march_enabled(mask: DomainMask) -> bool {
    let solvers = mask.difference(DomainMask::single(Domain::Mesh));
    !solvers.is_empty() && solvers.iter().all(Domain::time_march_eligible)
}

/// Variables produced by any domain in `mask`, deduplicated, in
/// declaration order.
pub fn variables_for(mask: DomainMask) -> Vec<VariableKind> {
    VariableKind::ALL
        .into_iter()
        .filter(|v| v.produced_by().intersects(mask))
        .collect()
}

/// Reorder `list` so every domain follows the domains it requires.
///
/// Stable bubble promotion: scan pairs `(i, j)` with `i < j`; when
/// `list[i]` requires `list[j]`, move `list[j]` to just before `list[i]`
/// and rescan. A list that is already correctly ordered is left untouched.
///
/// Returns [`DomainError::DependencyCycle`] without modifying `list` if the
/// requirements among the listed domains are circular.
pub fn sort_by_dependency(list: &mut [Domain]) -> Result<(), DomainError> {
    sort_with(list, Domain::required)
}

fn sort_with(
    list: &mut [Domain],
    requires: impl Fn(Domain) -> DomainMask,
) -> Result<(), DomainError> {
    if let Some(domains) = find_cycle(list, &requires) {
        return Err(DomainError::DependencyCycle { domains });
    }
    'scan: loop {
        for i in 0..list.len() {
            let needs = requires(list[i]);
            for j in i + 1..list.len() {
                if needs.contains(list[j]) {
                    list[i..=j].rotate_right(1);
                    continue 'scan;
                }
            }
        }
        return Ok(());
    }
}

fn find_cycle(list: &[Domain], requires: &impl Fn(Domain) -> DomainMask) -> Option<Vec<Domain>> {
    let members: DomainMask = list.iter().copied().collect();
    let mut done = DomainMask::EMPTY;
    let mut path = Vec::new();
    list.iter()
        .find_map(|&start| visit(start, members, requires, &mut done, &mut path))
}

fn visit(
    domain: Domain,
    members: DomainMask,
    requires: &impl Fn(Domain) -> DomainMask,
    done: &mut DomainMask,
    path: &mut Vec<Domain>,
) -> Option<Vec<Domain>> {
    if done.contains(domain) {
        return None;
    }
    if let Some(pos) = path.iter().position(|&d| d == domain) {
        return Some(path[pos..].to_vec());
    }
    path.push(domain);
    for next in requires(domain) & members {
        if let Some(cycle) = visit(next, members, requires, done, path) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(domain);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn required_mask_unions_direct_requirements() {
        let mask = DomainMask::of(&[Domain::Contaminant, Domain::RadiativeHeat]);
        assert_eq!(
            required_mask(mask),
            DomainMask::of(&[Domain::Fluid, Domain::Heat])
        );
        assert_eq!(required_mask(DomainMask::EMPTY), DomainMask::EMPTY);
    }

    #[test]
    fn excluded_mask_reports_without_rejecting() {
        let mask = DomainMask::of(&[Domain::Fluid, Domain::Potential]);
        let excluded = excluded_mask(mask);
        assert!(excluded.contains(Domain::Fluid));
        assert!(excluded.contains(Domain::Potential));
    }

    #[test]
    fn close_required_adds_missing_dependencies() {
        let closed = close_required(DomainMask::of(&[Domain::Magnetostatics]));
        assert_eq!(
            closed,
            DomainMask::of(&[Domain::Electrostatics, Domain::Magnetostatics])
        );
    }

    #[test]
    fn validate_composition_finds_excluded_pair() {
        assert_eq!(
            validate_composition(DomainMask::of(&[Domain::Fluid, Domain::Potential])),
            Err(DomainError::ExcludedCombination {
                domain: Domain::Potential,
                excluded_by: Domain::Fluid,
            })
        );
        assert!(validate_composition(DomainMask::of(&[
            Domain::Stress,
            Domain::StressModal,
            Domain::Mesh
        ]))
        .is_ok());
        assert!(
            validate_composition(DomainMask::of(&[Domain::Heat, Domain::StressModal])).is_err()
        );
    }

    #[test]
    fn time_march_rules() {
        assert!(!time_march_enabled(DomainMask::EMPTY));
        assert!(!time_march_enabled(DomainMask::single(Domain::Mesh)));
        assert!(time_march_enabled(DomainMask::of(&[Domain::Heat, Domain::Mesh])));
        assert!(!time_march_enabled(DomainMask::of(&[
            Domain::Heat,
            Domain::Electrostatics
        ])));
    }

    #[test]
    fn variables_for_is_deduplicated_and_ordered() {
        let vars = variables_for(DomainMask::of(&[Domain::Heat, Domain::FluidHeat, Domain::Fluid]));
        assert_eq!(
            vars,
            vec![
                VariableKind::Temperature,
                VariableKind::Velocity,
                VariableKind::Pressure,
                VariableKind::HeatFlux,
            ]
        );
    }

    #[test]
    fn domains_for_follows_declaration_order() {
        let list = domains_for(DomainMask::of(&[Domain::Wave, Domain::Fluid]));
        assert_eq!(list.as_slice(), &[Domain::Fluid, Domain::Wave]);
    }

    #[test]
    fn sort_promotes_required_domain() {
        let mut list = [Domain::Heat, Domain::RadiativeHeat, Domain::Contaminant, Domain::Fluid];
        sort_by_dependency(&mut list).unwrap();
        assert_eq!(
            list,
            [Domain::Heat, Domain::RadiativeHeat, Domain::Fluid, Domain::Contaminant]
        );
    }

    #[test]
    fn sort_detects_cycles() {
        let cyclic = |d: Domain| match d {
            Domain::Heat => DomainMask::single(Domain::Fluid),
            Domain::Fluid => DomainMask::single(Domain::Heat),
            _ => DomainMask::EMPTY,
        };
        let mut list = [Domain::Stress, Domain::Heat, Domain::Fluid];
        let err = sort_with(&mut list, cyclic).unwrap_err();
        assert_eq!(
            err,
            DomainError::DependencyCycle {
                domains: vec![Domain::Heat, Domain::Fluid]
            }
        );
        assert_eq!(list, [Domain::Stress, Domain::Heat, Domain::Fluid]);
    }

    #[test]
    fn requirement_outside_list_is_ignored() {
        let mut list = [Domain::Contaminant, Domain::Heat];
        sort_by_dependency(&mut list).unwrap();
        assert_eq!(list, [Domain::Contaminant, Domain::Heat]);
    }

    fn arb_order() -> impl Strategy<Value = Vec<Domain>> {
        Just(Domain::ALL.to_vec())
            .prop_shuffle()
            .prop_flat_map(|all| {
                let len = all.len();
                (Just(all), 0..=len)
            })
            .prop_map(|(all, n)| all[..n].to_vec())
    }

    proptest! {
        #[test]
        fn sorted_list_respects_requirements(mut list in arb_order()) {
            let before: DomainMask = list.iter().copied().collect();
            sort_by_dependency(&mut list).unwrap();
            let after: DomainMask = list.iter().copied().collect();
            prop_assert_eq!(before, after);
            for i in 0..list.len() {
                for j in i + 1..list.len() {
                    prop_assert!(!list[i].required().contains(list[j]),
                        "{} placed before its requirement {}", list[i], list[j]);
                }
            }
        }

        #[test]
        fn sorting_is_idempotent(mut list in arb_order()) {
            sort_by_dependency(&mut list).unwrap();
            let once = list.clone();
            sort_by_dependency(&mut list).unwrap();
            prop_assert_eq!(once, list);
        }
    }
}
