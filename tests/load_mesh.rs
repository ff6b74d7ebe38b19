mod util;

use flate2::Compression;
use flate2::write::GzEncoder;
use mesh_quality::io::{load_mesh, save_mesh};
use mesh_quality::mesh_error::MeshError;
use mesh_quality::mesh_generation::{unit_cube_mesh, unit_square_mesh};
use mesh_quality::topology::cell_type::CellType;
use std::fs;
use std::io::Write;
use std::path::Path;
use util::Scratch;

const EQUILATERAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dolfin xmlns:dolfin="http://fenicsproject.org">
  <mesh celltype="triangle" dim="2">
    <vertices size="3">
      <vertex index="0" x="0" y="0"/>
      <vertex index="1" x="1" y="0"/>
      <vertex index="2" x="0.5" y="0.8660254037844386"/>
    </vertices>
    <cells size="1">
      <triangle index="0" v0="0" v1="1" v2="2"/>
    </cells>
  </mesh>
</dolfin>
"#;

fn write_gz(path: &Path, contents: &[u8]) {
    let mut encoder = GzEncoder::new(fs::File::create(path).expect("create"), Compression::fast());
    encoder.write_all(contents).expect("compress");
    encoder.finish().expect("finish gzip");
}

#[test]
fn gzip_and_plain_xml_load_identically() {
    let plain = Scratch::new("equilateral.xml");
    let gz = Scratch::new("equilateral.xml.gz");
    fs::write(&plain, EQUILATERAL).expect("write plain");
    write_gz(&gz, EQUILATERAL.as_bytes());

    let a = load_mesh(&plain).expect("plain load");
    let b = load_mesh(&gz).expect("gzip load");
    assert_eq!(a, b);
    assert_eq!(a.cell_type(), CellType::Triangle);
    assert_eq!(a.num_cells(), 1);
}

#[test]
fn save_then_load_round_trips() {
    for (name, mesh) in [
        ("square.xml", unit_square_mesh(4, 2).expect("square")),
        ("cube.xml.gz", unit_cube_mesh(2, 1, 1).expect("cube")),
    ] {
        let path = Scratch::new(name);
        save_mesh(&path, &mesh).expect("save");
        let back = load_mesh(&path).expect("load");
        assert_eq!(back, mesh, "{name} should round trip");
    }
}

#[test]
fn corrupt_gzip_is_a_format_error() {
    let path = Scratch::new("corrupt.xml.gz");
    fs::write(&path, b"definitely not gzip").expect("write");
    let err = load_mesh(&path).expect_err("corrupt gzip must fail");
    assert!(matches!(err, MeshError::Format(_)), "{err:?}");
}

#[test]
fn missing_default_mesh_is_resource_not_found() {
    let err = load_mesh("../does_not_exist.xml.gz").expect_err("missing file");
    assert!(matches!(err, MeshError::ResourceNotFound { .. }));
    assert!(err.to_string().contains("does_not_exist.xml.gz"));
}

#[test]
fn gmsh_file_loads_by_extension() {
    let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n$EndNodes\n$Elements\n1\n1 2 2 0 1 1 2 3\n$EndElements\n";
    let path = Scratch::new("triangle.msh.gz");
    write_gz(&path, msh.as_bytes());
    let mesh = load_mesh(&path).expect("gmsh load");
    assert_eq!(mesh.cell_type(), CellType::Triangle);
    assert_eq!(mesh.geometric_dimension(), 2);
    assert_eq!(mesh.num_vertices(), 3);
}

#[test]
fn malformed_plain_files_are_format_errors() {
    let msh = Scratch::new("bad-utf8.msh");
    let mut bytes = b"$MeshFormat\n2.2 0 8\n$EndMeshFormat\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    fs::write(&msh, bytes).expect("write msh");
    let err = load_mesh(&msh).expect_err("invalid UTF-8");
    assert!(matches!(err, MeshError::Format(_)), "{err:?}");

    let xml = Scratch::new("huge.xml");
    fs::write(
        &xml,
        r#"<dolfin><mesh celltype="triangle" dim="2"><vertices size="18446744073709551615"></vertices></mesh></dolfin>"#,
    )
    .expect("write xml");
    let err = load_mesh(&xml).expect_err("undeclared vertices");
    assert!(matches!(err, MeshError::Format(_)), "{err:?}");
}
