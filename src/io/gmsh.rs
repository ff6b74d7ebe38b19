//! Gmsh `.msh` reader.
//!
//! # Supported format
//! - ASCII `.msh` version **2.x** (2.2 is what current Gmsh writes with
//!   `-format msh2`).
//! - Element types: 1 (line), 2 (triangle), 4 (tet), 15 (point).
//!
//! Only the highest-dimensional simplices become mesh cells; lower-dimensional
//! elements (boundary lines, faces, tagged points) are dropped. Node ids may
//! be sparse and are compacted to dense vertex indices in file order. The
//! geometric dimension is the smallest one, at least the cell dimension, for
//! which every dropped trailing coordinate is zero.
//!
//! # Limitations
//! - Binary files are not supported.
//! - `.msh` v4.x (block-based) is not supported.
//! - Non-simplex and higher-order elements are rejected.
//! - Element tags are ignored (no physical groups or boundary markers).

use crate::data::coordinates::Coordinates;
use crate::io::MeshReader;
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;
use hashbrown::HashMap;
use std::io::Read;

/// Gmsh `.msh` reader for ASCII v2 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

impl GmshReader {
    fn parse_version(line: &str) -> Result<String, MeshError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| MeshError::format("missing mesh format version"))?;
        let file_type = parts
            .next()
            .ok_or_else(|| MeshError::format("missing mesh format type"))?;
        if file_type != "0" {
            return Err(MeshError::format("binary .msh files are not supported"));
        }
        if !version.starts_with("2.") {
            return Err(MeshError::format(format!(
                "unsupported gmsh version: {version}"
            )));
        }
        Ok(version.to_string())
    }

    /// `None` for point elements, which carry no cell.
    fn element_cell_type(elem_type: u32) -> Result<Option<CellType>, MeshError> {
        if elem_type == 15 {
            return Ok(None);
        }
        CellType::from_gmsh(elem_type)
            .map(Some)
            .ok_or_else(|| MeshError::format(format!("unsupported element type: {elem_type}")))
    }

    fn parse_count(line: Option<&str>, what: &str) -> Result<usize, MeshError> {
        let line = line.ok_or_else(|| MeshError::format(format!("missing {what} count")))?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| MeshError::format(format!("invalid {what} count: {line}")))
    }

    fn parse_field<T: std::str::FromStr>(raw: Option<&str>, what: &str) -> Result<T, MeshError> {
        let raw = raw.ok_or_else(|| MeshError::format(format!("missing {what}")))?;
        raw.parse::<T>()
            .map_err(|_| MeshError::format(format!("invalid {what}: {raw}")))
    }

    fn expect_end<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        tag: &str,
    ) -> Result<(), MeshError> {
        match lines.next() {
            Some(line) if line.trim() == tag => Ok(()),
            _ => Err(MeshError::format(format!("missing {tag}"))),
        }
    }
}

impl MeshReader for GmshReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<Mesh, MeshError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                MeshError::format(format!("gmsh file is not valid UTF-8: {e}"))
            } else {
                MeshError::from(e)
            }
        })?;
        let mut lines = contents.lines();

        let mut version: Option<String> = None;
        let mut node_index: HashMap<u64, usize> = HashMap::new();
        let mut nodes: Vec<[f64; 3]> = Vec::new();
        let mut elements: Vec<(CellType, Vec<u64>)> = Vec::new();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| MeshError::format("missing MeshFormat"))?;
                    version = Some(Self::parse_version(format_line)?);
                    Self::expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let node_count = Self::parse_count(lines.next(), "node")?;
                    // Each node line takes at least one byte per field.
                    nodes.reserve(node_count.min(contents.len() / 8));
                    for _ in 0..node_count {
                        let node_line = lines
                            .next()
                            .ok_or_else(|| MeshError::format("unexpected end of node list"))?;
                        let mut parts = node_line.split_whitespace();
                        let id: u64 = Self::parse_field(parts.next(), "node id")?;
                        let x = Self::parse_field(parts.next(), "x coordinate")?;
                        let y = Self::parse_field(parts.next(), "y coordinate")?;
                        let z = Self::parse_field(parts.next(), "z coordinate")?;
                        if node_index.insert(id, nodes.len()).is_some() {
                            return Err(MeshError::format(format!("duplicate node id: {id}")));
                        }
                        nodes.push([x, y, z]);
                    }
                    Self::expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    let elem_count = Self::parse_count(lines.next(), "element")?;
                    for _ in 0..elem_count {
                        let elem_line = lines
                            .next()
                            .ok_or_else(|| MeshError::format("unexpected end of element list"))?;
                        let mut parts = elem_line.split_whitespace();
                        let _elem_id: u64 = Self::parse_field(parts.next(), "element id")?;
                        let elem_type: u32 = Self::parse_field(parts.next(), "element type")?;
                        let num_tags: usize = Self::parse_field(parts.next(), "element tag count")?;
                        for _ in 0..num_tags {
                            parts.next();
                        }
                        let Some(cell_type) = Self::element_cell_type(elem_type)? else {
                            continue;
                        };
                        let conn = (0..cell_type.num_vertices())
                            .map(|_| Self::parse_field::<u64>(parts.next(), "element node id"))
                            .collect::<Result<Vec<_>, _>>()?;
                        elements.push((cell_type, conn));
                    }
                    Self::expect_end(&mut lines, "$EndElements")?;
                }
                _ => {
                    // ignore other sections
                }
            }
        }

        if version.is_none() {
            return Err(MeshError::format("missing $MeshFormat section"));
        }

        let cell_type = elements
            .iter()
            .map(|(ct, _)| *ct)
            .max_by_key(|ct| ct.dimension())
            .ok_or_else(|| MeshError::format("gmsh file contains no cells"))?;
        let dropped = elements
            .iter()
            .filter(|(ct, _)| *ct != cell_type)
            .count();
        if dropped > 0 {
            log::warn!("dropping {dropped} lower-dimensional gmsh elements");
        }

        let mut cells = Vec::with_capacity(elements.len() - dropped);
        for (ct, conn) in elements.iter().filter(|(ct, _)| *ct == cell_type) {
            let cone = conn
                .iter()
                .map(|id| {
                    node_index.get(id).copied().ok_or_else(|| {
                        MeshError::format(format!("{ct} element references unknown node {id}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(cone);
        }

        let dim = (cell_type.dimension()..=3)
            .find(|&d| nodes.iter().all(|p| p[d..].iter().all(|&c| c == 0.0)))
            .unwrap_or(3);
        let values: Vec<f64> = nodes.iter().flat_map(|p| p[..dim].to_vec()).collect();
        let coordinates = Coordinates::try_new(dim, values)?;
        let connectivity = Connectivity::try_from_cells(&cells, coordinates.len())?;
        Mesh::try_new(cell_type, coordinates, connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
5
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
10 0.5 0.5 0
$EndNodes
$Elements
7
1 15 2 0 1 1
2 1 2 1 1 1 2
3 1 2 1 1 2 3
4 2 2 7 42 1 2 10
5 2 2 7 42 2 3 10
6 2 2 7 42 3 4 10
7 2 2 7 42 4 1 10
$EndElements
"#;

    #[test]
    fn keeps_top_dimension_cells_and_compacts_nodes() {
        let mesh = GmshReader.read(SQUARE.as_bytes()).unwrap();
        assert_eq!(mesh.cell_type(), CellType::Triangle);
        assert_eq!(mesh.geometric_dimension(), 2);
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_cells(), 4);
        assert_eq!(mesh.cells().cone(0), Some(&[0, 1, 4][..]));
        assert_eq!(mesh.coordinates().try_restrict(4).unwrap(), &[0.5, 0.5]);
    }

    #[test]
    fn tetrahedra_keep_three_dimensions() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n4\n1 0 0 0\n2 1 0 0\n3 0 1 0\n4 0 0 1\n$EndNodes\n$Elements\n1\n1 4 0 1 2 3 4\n$EndElements\n";
        let mesh = GmshReader.read(msh.as_bytes()).unwrap();
        assert_eq!(mesh.cell_type(), CellType::Tetrahedron);
        assert_eq!(mesh.geometric_dimension(), 3);
    }

    #[test]
    fn rejects_binary_and_v4() {
        let binary = SQUARE.replace("2.2 0 8", "2.2 1 8");
        assert_eq!(
            GmshReader.read(binary.as_bytes()).unwrap_err(),
            MeshError::format("binary .msh files are not supported")
        );
        let v4 = SQUARE.replace("2.2 0 8", "4.1 0 8");
        assert!(matches!(
            GmshReader.read(v4.as_bytes()),
            Err(MeshError::Format(_))
        ));
    }

    #[test]
    fn rejects_quads_and_unknown_nodes() {
        let quads = SQUARE.replace("4 2 2 7 42 1 2 10", "4 3 2 7 42 1 2 3 4");
        assert_eq!(
            GmshReader.read(quads.as_bytes()).unwrap_err(),
            MeshError::format("unsupported element type: 3")
        );
        let dangling = SQUARE.replace("7 2 2 7 42 4 1 10", "7 2 2 7 42 4 1 99");
        assert!(matches!(
            GmshReader.read(dangling.as_bytes()),
            Err(MeshError::Format(_))
        ));
    }

    #[test]
    fn huge_node_count_is_a_format_error() {
        let msh = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n18446744073709551615\n1 0 0 0\n$EndNodes\n";
        assert_eq!(
            GmshReader.read(msh.as_bytes()).unwrap_err(),
            MeshError::format("invalid node id: $EndNodes")
        );
        let overflow = msh.replace("18446744073709551615", "99999999999999999999999");
        assert!(matches!(
            GmshReader.read(overflow.as_bytes()),
            Err(MeshError::Format(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let mut bytes = b"$MeshFormat\n2.2 0 8\n$EndMeshFormat\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = GmshReader.read(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, MeshError::Format(_)), "{err:?}");
    }

    #[test]
    fn missing_end_marker_is_rejected() {
        let truncated = SQUARE.replace("$EndNodes", "");
        assert!(GmshReader.read(truncated.as_bytes()).is_err());
    }
}
