//! Material catalog: one file per material in a directory.

use std::fs;

use rhea_core::{Domain, DomainMask};
use rhea_material::{CatalogConfig, CatalogError, Material, MaterialCatalog};
use rhea_test_utils::fixtures::{density_only, steel, water};
use rhea_test_utils::{scratch_dir, LegacyFile};

#[test]
fn save_all_then_reopen() {
    let dir = scratch_dir();
    let config = CatalogConfig::new(dir.path());
    let mut catalog = MaterialCatalog::open(config.clone()).unwrap();
    let (w, s) = (water(), steel());
    catalog.insert(w.clone());
    catalog.insert(s.clone());
    catalog.save_all().unwrap();

    let reopened = MaterialCatalog::open(config).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get(w.id()), Some(&w));
    assert_eq!(reopened.find_by_name("Steel").map(Material::id), Some(s.id()));
}

#[test]
fn loads_both_encodings_and_skips_garbage() {
    let dir = scratch_dir();
    let (w, s) = (water(), steel());
    w.write(&dir.path().join(format!("{}.ramt", w.id()))).unwrap();
    s.write(&dir.path().join(format!("{}.rbmt", s.id()))).unwrap();
    fs::write(dir.path().join("broken.rbmt"), b"not a material").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(w.id()).is_some());
    assert!(catalog.get(s.id()).is_some());
}

#[test]
fn save_replaces_other_encoding() {
    let dir = scratch_dir();
    let mut text_config = CatalogConfig::new(dir.path());
    text_config.binary = false;
    let mut catalog = MaterialCatalog::open(text_config).unwrap();
    let w = water();
    catalog.insert(w.clone());
    let text_path = catalog.save(w.id()).unwrap();
    assert!(text_path.exists());

    let mut catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    let mut renamed = catalog.get(w.id()).unwrap().clone();
    renamed.set_name("Sea water");
    assert!(catalog.insert(renamed).is_some());
    let binary_path = catalog.save(w.id()).unwrap();
    assert!(binary_path.exists());
    assert!(!text_path.exists());

    let reopened = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(w.id()).unwrap().name(), "Sea water");
}

#[test]
fn delete_removes_files() {
    let dir = scratch_dir();
    let mut catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    let m = steel();
    catalog.insert(m.clone());
    let path = catalog.save(m.id()).unwrap();

    let removed = catalog.delete(m.id()).unwrap();
    assert_eq!(removed.id(), m.id());
    assert!(!path.exists());
    assert!(matches!(
        catalog.delete(m.id()),
        Err(CatalogError::UnknownMaterial { .. })
    ));
}

#[test]
fn remove_keeps_file_on_disk() {
    let dir = scratch_dir();
    let mut catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    let m = water();
    catalog.insert(m.clone());
    let path = catalog.save(m.id()).unwrap();
    assert!(catalog.remove(m.id()).is_some());
    assert!(catalog.is_empty());
    assert!(path.exists());
}

#[test]
fn valid_for_filters_by_domains() {
    let dir = scratch_dir();
    let mut catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    catalog.insert(water());
    catalog.insert(steel());
    catalog.insert(density_only());

    let fluid: Vec<&str> = catalog
        .valid_for(DomainMask::single(Domain::Fluid))
        .map(Material::name)
        .collect();
    assert_eq!(fluid, vec!["Water"]);

    let wave = catalog.valid_for(DomainMask::single(Domain::Wave)).count();
    assert_eq!(wave, 3);
}

#[test]
fn import_legacy_inserts_material() {
    let dir = scratch_dir();
    let legacy_dir = scratch_dir();
    let path = LegacyFile::new("Copper")
        .property("Density", 8960.0, "kg/m^3")
        .write_to(legacy_dir.path(), "copper.txt")
        .unwrap();

    let mut catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
    let id = catalog.import_legacy(&path).unwrap();
    assert_eq!(catalog.get(id).unwrap().name(), "Copper");
    catalog.save(id).unwrap();
    assert!(catalog.path_for(id).exists());
}

#[test]
fn file_in_place_of_directory_is_config_error() {
    let dir = scratch_dir();
    let file = dir.path().join("materials");
    fs::write(&file, b"").unwrap();
    let err = MaterialCatalog::open(CatalogConfig::new(&file)).unwrap_err();
    assert!(matches!(err, CatalogError::Config(_)), "{err}");
}
