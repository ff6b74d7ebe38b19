mod util;

use mesh_quality::io::save_mesh;
use mesh_quality::mesh::Mesh;
use mesh_quality::mesh_error::MeshError;
use mesh_quality::pipeline::{PipelineConfig, run};
use mesh_quality::plot::histogram::{DisplayMode, HistogramSpec};
use mesh_quality::plot::svg::{HISTOGRAM_FILE, MESH_FILE, SvgRenderer};
use mesh_quality::plot::terminal::TerminalRenderer;
use mesh_quality::topology::cell_type::CellType;
use std::fs;
use std::io::Cursor;
use util::Scratch;

fn regular_tetrahedron() -> Mesh {
    let s = 1.0 / 2f64.sqrt();
    Mesh::from_cells(
        CellType::Tetrahedron,
        3,
        &[[1.0, 0.0, -s], [-1.0, 0.0, -s], [0.0, 1.0, s], [0.0, -1.0, s]],
        &[[0usize, 1, 2, 3]],
    )
    .expect("regular tetrahedron")
}

fn equilateral_triangle() -> Mesh {
    Mesh::from_cells(
        CellType::Triangle,
        2,
        &[[0.0, 0.0], [1.0, 0.0], [0.5, 3f64.sqrt() / 2.0]],
        &[[0usize, 1, 2]],
    )
    .expect("equilateral triangle")
}

#[test]
fn ideal_cells_report_unit_ratio() {
    for (name, mesh) in [
        ("triangle.xml", equilateral_triangle()),
        ("tet.xml.gz", regular_tetrahedron()),
    ] {
        let path = Scratch::new(name);
        save_mesh(&path, &mesh).expect("save");
        let config = PipelineConfig {
            mesh_path: path.to_path_buf(),
            ..PipelineConfig::default()
        };
        let mut renderer = TerminalRenderer::headless(Vec::<u8>::new());
        let mut out = Vec::<u8>::new();
        let report = run(&config, &mut renderer, &mut out).expect("pipeline");

        assert!((report.qmin - 1.0).abs() < 1e-12, "{name}: {}", report.qmin);
        assert!((report.qmax - 1.0).abs() < 1e-12, "{name}: {}", report.qmax);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Minimal radius ratio: ").count(), 1);
        assert_eq!(text.matches("Maximal radius ratio: ").count(), 1);
        assert!(text.find("Minimal").expect("min") < text.find("Maximal").expect("max"));

        let drawn = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(drawn.contains("Radius ratio histogram"));
        assert!(drawn.contains("Mesh: 1 "));
    }
}

#[test]
fn svg_run_writes_plots_and_histogram_json() {
    let dir = Scratch::new("svg-out");
    fs::create_dir_all(&dir).expect("mkdir");
    let mesh_path = dir.join("square.xml");
    save_mesh(&mesh_path, &mesh_quality::mesh_generation::unit_square_mesh(5, 5).expect("mesh"))
        .expect("save");
    let json_path = dir.join("histogram.json");
    let config = PipelineConfig {
        mesh_path,
        num_bins: 25,
        histogram_json: Some(json_path.clone()),
        ..PipelineConfig::default()
    };

    // One line for the final interactive wait only.
    let mut input = Cursor::new("\n");
    let mut renderer = SvgRenderer::new(dir.to_path_buf(), Some(&mut input));
    let mut out = Vec::<u8>::new();
    let report = run(&config, &mut renderer, &mut out).expect("pipeline");
    drop(renderer);
    assert_eq!(input.position(), 1);
    assert_eq!(report.num_cells, 50);

    assert!(dir.join(HISTOGRAM_FILE).exists());
    assert!(dir.join(MESH_FILE).exists());
    let json = fs::read_to_string(&json_path).expect("json");
    let spec: HistogramSpec = serde_json::from_str(&json).expect("parse json");
    assert_eq!(spec.display, DisplayMode::NonBlocking);
    assert_eq!(spec.counts.len(), 25);
    assert_eq!(spec.total(), 50);
}

#[test]
fn degenerate_mesh_fails_with_computation_error() {
    let mesh = Mesh::from_cells(
        CellType::Triangle,
        2,
        &[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]],
        &[[0usize, 1, 2]],
    )
    .expect("collinear triangle is structurally valid");
    let path = Scratch::new("flat.xml");
    save_mesh(&path, &mesh).expect("save");
    let config = PipelineConfig {
        mesh_path: path.to_path_buf(),
        ..PipelineConfig::default()
    };
    let mut renderer = TerminalRenderer::headless(Vec::<u8>::new());
    let mut out = Vec::<u8>::new();
    let err = run(&config, &mut renderer, &mut out).expect_err("degenerate");
    assert!(matches!(err, MeshError::Computation(_)), "{err:?}");
    assert!(out.is_empty());
}

#[test]
fn missing_mesh_aborts_before_output() {
    let config = PipelineConfig {
        mesh_path: "../does_not_exist.xml.gz".into(),
        ..PipelineConfig::default()
    };
    let mut renderer = TerminalRenderer::headless(Vec::<u8>::new());
    let mut out = Vec::<u8>::new();
    let err = run(&config, &mut renderer, &mut out).expect_err("missing");
    assert!(matches!(err, MeshError::ResourceNotFound { .. }));
    assert!(out.is_empty());
    assert!(renderer.into_inner().is_empty());
}
