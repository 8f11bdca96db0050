//! Problem persistence as model files.

use std::fs;
use std::path::Path;

use rhea_codec::{
    decode_record, encode_header, encode_record, write_file, BinaryEncoder, Encoding, Record,
};
use rhea_core::{Domain, DomainMask, FileHeader, FileKind, RheaError, Version};
use rhea_material::Material;
use rhea_problem::{MatrixSolverKind, Problem};
use rhea_test_utils::fixtures::{heat_problem, water};
use rhea_test_utils::scratch_dir;

#[test]
fn roundtrip_in_both_encodings() {
    let dir = scratch_dir();
    let problem = heat_problem();
    for name in ["heat.ramd", "heat.rbmd"] {
        let path = dir.path().join(name);
        problem.write(&path).unwrap();
        let back = Problem::read(&path).unwrap();
        assert_eq!(back, problem);
        assert_eq!(back.time_solver().times(), problem.time_solver().times());
        assert_eq!(
            back.solver_config(MatrixSolverKind::Gmres).unwrap().max_iterations,
            250
        );
        assert_eq!(
            back.monitoring_points().get(0).unwrap().output_file_name,
            Path::new("monitor-heat.txt")
        );
    }
}

#[test]
fn reading_material_as_model_is_invalid_format() {
    let dir = scratch_dir();
    let m = water();
    let path = dir.path().join(m.file_name(Encoding::Text));
    m.write(&path).unwrap();

    let disguised = dir.path().join("disguised.ramd");
    fs::copy(&path, &disguised).unwrap();
    let err = Problem::read(&disguised).unwrap_err();
    assert!(
        matches!(
            err,
            RheaError::InvalidFileFormat {
                expected: FileKind::Model,
                found: FileKind::Material,
                ..
            }
        ),
        "{err}"
    );
    assert!(Material::read(&path).is_ok());
}

/// Encoded size of a default `ProblemSetup`: modal block plus an empty
/// variable list and two edge lengths.
const DEFAULT_SETUP_LEN: usize = (1 + 4 + 4 + 8 + 4 + 8) + 4 + 8 + 8;

#[test]
fn version_1_0_files_have_no_monitoring_points() {
    let mut problem = heat_problem();
    problem.monitoring_points_mut().clear();
    problem.set_setup(Default::default());

    let mut header = FileHeader::new(FileKind::Model);
    header.version = Version::new(1, 0, 0);
    let mut bytes = Vec::new();
    {
        let mut enc = BinaryEncoder::new(&mut bytes);
        encode_header(&mut enc, &header).unwrap();
        problem.encode(&mut enc).unwrap();
    }
    // A 1.0.0 writer did not emit the (here empty) monitoring list, which
    // sits right before the setup block.
    let points_at = bytes.len() - DEFAULT_SETUP_LEN - 4;
    assert_eq!(&bytes[points_at..points_at + 4], &[0, 0, 0, 0]);
    bytes.drain(points_at..points_at + 4);

    let (h, back): (FileHeader, Problem) = decode_record(Encoding::Binary, &bytes).unwrap();
    assert_eq!(h.version, Version::new(1, 0, 0));
    assert_eq!(back, problem);
}

#[test]
fn in_memory_roundtrip_keeps_domains() {
    let mut problem = Problem::new();
    problem
        .set_domains(DomainMask::of(&[Domain::FluidHeat, Domain::Contaminant]))
        .unwrap();
    let bytes = encode_record(Encoding::Text, &FileHeader::new(FileKind::Model), &problem).unwrap();
    let (_, back): (FileHeader, Problem) = decode_record(Encoding::Text, &bytes).unwrap();
    assert_eq!(back.domains(), problem.domains());
    assert!(back.domains().contains(Domain::Fluid));
}

#[test]
fn newer_model_read_as_material_is_invalid_format() {
    let dir = scratch_dir();
    let path = dir.path().join("future.rbmd");
    let mut header = FileHeader::new(FileKind::Model);
    header.version = Version::new(9, 0, 0);
    write_file(&path, &header, &heat_problem()).unwrap();

    let err = Material::read(&path).unwrap_err();
    assert!(
        matches!(
            err,
            RheaError::InvalidFileFormat {
                expected: FileKind::Material,
                found: FileKind::Model,
                ..
            }
        ),
        "{err}"
    );
    assert!(matches!(Problem::read(&path), Err(RheaError::ReadFile { .. })));
}
