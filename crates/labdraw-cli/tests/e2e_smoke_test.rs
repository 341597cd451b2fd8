use std::fs;

use tempfile::tempdir;

use labdraw_cli::{Args, DiagramSelection, run};

fn args(output_dir: &str, diagram: DiagramSelection) -> Args {
    Args {
        output_dir: output_dir.to_string(),
        diagram,
        config: None,
        // Keep the raster exports small
        dpi: Some(36.0),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let written = run(&args(&output_dir.to_string_lossy(), DiagramSelection::All))
        .expect("Failed to generate diagrams");

    let names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "gcp-dns-lab-architecture-professional.png",
            "gcp-dns-lab-architecture-professional.pdf",
            "gcp-dns-lab-architecture.png",
            "gcp-dns-lab-architecture.pdf",
            "gcp-dns-lab-flow-professional.png",
        ]
    );

    for path in &written {
        assert!(path.starts_with(&output_dir));
        let size = fs::metadata(path).unwrap().len();
        assert!(size > 0, "{} is empty", path.display());
    }
}

#[test]
fn e2e_smoke_test_single_diagram() {
    let temp_dir = tempdir().unwrap();

    let written = run(&args(
        &temp_dir.path().to_string_lossy(),
        DiagramSelection::Flow,
    ))
    .unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().unwrap();
    let mut args = args(&temp_dir.path().to_string_lossy(), DiagramSelection::All);
    args.config = Some(
        temp_dir
            .path()
            .join("missing.toml")
            .to_string_lossy()
            .into_owned(),
    );

    assert!(run(&args).is_err());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn e2e_smoke_test_invalid_dpi_fails() {
    let temp_dir = tempdir().unwrap();
    let mut args = args(&temp_dir.path().to_string_lossy(), DiagramSelection::Flow);
    args.dpi = Some(0.0);

    assert!(run(&args).is_err());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
