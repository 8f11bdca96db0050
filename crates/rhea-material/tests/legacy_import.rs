//! Legacy plain-text material import.

use rhea_core::{Domain, DomainMask, RheaError};
use rhea_material::{import_legacy, PropertyType};
use rhea_test_utils::{scratch_dir, LegacyFile};

#[test]
fn imports_scalar_and_tabulated_properties() {
    let dir = scratch_dir();
    let path = LegacyFile::new("Aluminium")
        .property("Density", 2700.0, "kg/m^3")
        .property("Emissivity", 0.09, "")
        .tabulated(
            "Thermal conductivity",
            237.0,
            "W/(m*K)",
            &[(300.0, 237.0), (400.0, 240.0), (200.0, 237.5)],
        )
        .property("Heat capacity", 897.0, "J/(kg*K)")
        .write_to(dir.path(), "aluminium.txt")
        .unwrap();

    let m = import_legacy(&path).unwrap();
    assert_eq!(m.name(), "Aluminium");
    assert_eq!(m.len(), 4);
    assert_eq!(
        m.find(PropertyType::Density).unwrap().table().get(0),
        (293.15, 2700.0)
    );
    let k = m.find(PropertyType::ThermalConductivity).unwrap();
    assert_eq!(
        k.table().iter().collect::<Vec<_>>(),
        vec![(200.0, 237.5), (300.0, 237.0), (400.0, 240.0)]
    );
    assert!(m.valid_for_domains(DomainMask::single(Domain::Heat)));
}

#[test]
fn tables_attach_by_name_not_position() {
    // Declared out of type order: the table belongs to heat capacity even
    // though the material stores density first.
    let dir = scratch_dir();
    let path = LegacyFile::new("Ordered")
        .tabulated("Heat capacity", 1.0, "J/(kg*K)", &[(250.0, 10.0), (350.0, 20.0)])
        .property("Density", 5.0, "kg/m^3")
        .write_to(dir.path(), "ordered.txt")
        .unwrap();

    let m = import_legacy(&path).unwrap();
    assert_eq!(m.find(PropertyType::Density).unwrap().table().len(), 1);
    assert_eq!(m.find(PropertyType::HeatCapacity).unwrap().table().len(), 2);
}

#[test]
fn survives_unknown_content() {
    let dir = scratch_dir();
    let path = LegacyFile::new("Odd")
        .property("Porosity", 0.4, "-")
        .raw_property("Density", "heavy", "kg/m^3")
        .property("Poissons ratio", 0.33, "")
        .extra_line("COLOR: 12 34 56")
        .extra_line("# free comment")
        .write_to(dir.path(), "odd.txt")
        .unwrap();

    let m = import_legacy(&path).unwrap();
    assert_eq!(m.name(), "Odd");
    assert_eq!(m.len(), 1);
    assert!(m.find(PropertyType::PoissonRatio).is_some());
}

#[test]
fn imported_materials_get_fresh_ids() {
    let dir = scratch_dir();
    let path = LegacyFile::new("Twice")
        .property("Density", 1.0, "kg/m^3")
        .write_to(dir.path(), "twice.txt")
        .unwrap();
    let a = import_legacy(&path).unwrap();
    let b = import_legacy(&path).unwrap();
    assert_ne!(a.id(), b.id());
    assert!(a.properties_equal(&b));
}

#[test]
fn empty_file_name_is_rejected() {
    let err = import_legacy(std::path::Path::new("")).unwrap_err();
    assert!(matches!(err, RheaError::InvalidFileName { .. }), "{err}");
}

#[test]
fn oversized_table_declaration_reads_what_is_there() {
    let dir = scratch_dir();
    for size in ["4611686018427387904", "18446744073709551615"] {
        let text = format!(
            "!VERSION 2.0.0\nNAME: Huge\nNPROP: 1\nproperties:\nDensity\n998\nkg/m^3\n{size}\n\
             Density/temperature: 300 1000\n400 990\n"
        );
        let path = dir.path().join("huge.txt");
        std::fs::write(&path, text).unwrap();

        let m = import_legacy(&path).unwrap();
        assert_eq!(m.name(), "Huge");
        let density = m.find(PropertyType::Density).unwrap();
        assert_eq!(
            density.table().iter().collect::<Vec<_>>(),
            vec![(300.0, 1000.0), (400.0, 990.0)]
        );
    }
}
