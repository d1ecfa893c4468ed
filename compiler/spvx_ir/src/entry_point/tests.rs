use pretty_assertions::assert_eq;

use super::*;

#[test]
fn new_entry_point() {
    let ep = EntryPoint::new(Id::new(4), "main", ExecutionModel::Fragment);
    assert_eq!(ep.name, "main");
    assert_eq!(ep.orig_name, "main");
    assert_eq!(ep.model, ExecutionModel::Fragment);
    assert!(ep.flags.is_empty());
    assert_eq!(ep.workgroup_size, WorkgroupSize::default());
}

#[test]
fn local_size_mode() {
    let mut ep = EntryPoint::new(Id::new(4), "main", ExecutionModel::GLCompute);
    ep.set_execution_mode(ExecutionMode::LocalSize, &[8, 4, 1]);
    assert!(ep.has_execution_mode(ExecutionMode::LocalSize));
    assert_eq!(
        ep.workgroup_size,
        WorkgroupSize {
            x: 8,
            y: 4,
            z: 1,
            ..WorkgroupSize::default()
        }
    );
    assert!(!ep.workgroup_size.is_specialized());
}

#[test]
fn local_size_id_mode_records_constant_ids() {
    let mut ep = EntryPoint::new(Id::new(4), "main", ExecutionModel::GLCompute);
    ep.set_execution_mode(ExecutionMode::LocalSizeId, &[10, 11, 12]);
    assert!(ep.has_execution_mode(ExecutionMode::LocalSizeId));
    assert!(!ep.has_execution_mode(ExecutionMode::LocalSize));
    assert_eq!(
        ep.workgroup_size,
        WorkgroupSize {
            id_x: Id::new(10),
            id_y: Id::new(11),
            id_z: Id::new(12),
            ..WorkgroupSize::default()
        }
    );
    assert!(ep.workgroup_size.is_specialized());
}

#[test]
fn short_local_size_is_ignored() {
    let mut ep = EntryPoint::new(Id::new(4), "main", ExecutionModel::GLCompute);
    ep.set_execution_mode(ExecutionMode::LocalSize, &[8]);
    assert!(ep.has_execution_mode(ExecutionMode::LocalSize));
    assert_eq!(ep.workgroup_size.x, 0);
}

#[test]
fn geometry_modes() {
    let mut ep = EntryPoint::new(Id::new(4), "gs", ExecutionModel::Geometry);
    ep.set_execution_mode(ExecutionMode::Invocations, &[2]);
    ep.set_execution_mode(ExecutionMode::OutputVertices, &[3]);
    assert_eq!(ep.invocations, 2);
    assert_eq!(ep.output_vertices, 3);
}

#[test]
fn flag_only_mode() {
    let mut ep = EntryPoint::new(Id::new(4), "main", ExecutionModel::Fragment);
    ep.set_execution_mode(ExecutionMode::OriginUpperLeft, &[]);
    assert!(ep.has_execution_mode(ExecutionMode::OriginUpperLeft));
    assert!(!ep.has_execution_mode(ExecutionMode::DepthReplacing));
}

#[test]
fn source_defaults_to_unknown() {
    let source = Source::default();
    assert!(!source.known);
    assert_eq!(source.version, 0);
}

#[test]
fn source_dialects() {
    assert_eq!(
        Source::from_language(SourceLanguage::ESSL, 310),
        Source {
            version: 310,
            es: true,
            known: true,
            hlsl: false,
        }
    );
    assert_eq!(
        Source::from_language(SourceLanguage::GLSL, 450),
        Source {
            version: 450,
            es: false,
            known: true,
            hlsl: false,
        }
    );
    let hlsl = Source::from_language(SourceLanguage::HLSL, 500);
    assert!(hlsl.hlsl);
    assert!(hlsl.known);
    assert_eq!(hlsl.version, 450);
    assert_eq!(
        Source::from_language(SourceLanguage::OpenCL_C, 120),
        Source::default()
    );
}
