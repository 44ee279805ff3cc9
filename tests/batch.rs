//! Filesystem pipelines: data generation, model generation, re-runs.

use std::fs;
use u_mipgen::batch::{
    generate_noise_data, generate_noise_models, instance_files, write_once, OutputDir,
    WriteOutcome,
};
use u_mipgen::noise::{read_noise_dosage, GeneratorConfig, GeneratorParams};

fn grid() -> Vec<GeneratorParams> {
    vec![
        GeneratorParams::new(3, 8, 480, 0),
        GeneratorParams::new(3, 8, 480, 1),
        GeneratorParams::new(4, 9, 480, 0),
    ]
}

#[test]
fn generated_data_is_byte_identical_across_runs() {
    let root = tempfile::tempdir().unwrap();
    let a = OutputDir::prepare(root.path().join("a")).unwrap();
    let b = OutputDir::prepare(root.path().join("b")).unwrap();
    let config = GeneratorConfig::default();

    generate_noise_data(&a, &grid(), &config).unwrap();
    generate_noise_data(&b, &grid(), &config).unwrap();

    for params in grid() {
        let name = params.name();
        let left = fs::read(a.join(&name)).unwrap();
        let right = fs::read(b.join(&name)).unwrap();
        assert_eq!(left, right, "{name} differs");
    }
}

#[test]
fn data_then_models_pipeline() {
    let root = tempfile::tempdir().unwrap();
    let data = OutputDir::prepare(root.path().join("data_generated")).unwrap();
    let instances = OutputDir::prepare(root.path().join("instances")).unwrap();

    let report = generate_noise_data(&data, &grid(), &GeneratorConfig::default()).unwrap();
    assert_eq!(report.written.len(), 3);
    assert_eq!(instance_files(data.path()).unwrap().len(), 3);

    let inst = read_noise_dosage(data.join("noise4_9_480_s0")).unwrap();
    assert_eq!((inst.m(), inst.n(), inst.total_hours()), (4, 9, 480));

    let models = generate_noise_models(data.path(), &instances).unwrap();
    assert_eq!(models.written.len(), 6);
    for params in grid() {
        let name = params.name();
        assert!(instances.join(format!("{name}.mps")).is_file());
        assert!(instances.join(format!("{name}_sym.mps")).is_file());
    }

    // re-running touches nothing
    let again = generate_noise_models(data.path(), &instances).unwrap();
    assert!(again.written.is_empty());
    assert_eq!(again.skipped.len(), 6);
}

#[test]
fn rerun_only_fills_gaps() {
    let root = tempfile::tempdir().unwrap();
    let data = OutputDir::prepare(root.path()).unwrap();
    let config = GeneratorConfig::default();

    // a stale file with the same name is kept as is
    let stale = data.join(grid()[1].name());
    assert_eq!(
        write_once(&stale, |_| Ok(())).unwrap(),
        WriteOutcome::Written
    );

    let report = generate_noise_data(&data, &grid(), &config).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped, vec![stale.clone()]);
    assert!(fs::read(&stale).unwrap().is_empty());
}
