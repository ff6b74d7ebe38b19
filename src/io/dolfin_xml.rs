//! DOLFIN XML mesh reader and writer.
//!
//! # Supported format
//! ```xml
//! <dolfin xmlns:dolfin="http://fenicsproject.org">
//!   <mesh celltype="triangle" dim="2">
//!     <vertices size="3">
//!       <vertex index="0" x="0" y="0"/>
//!       ...
//!     </vertices>
//!     <cells size="1">
//!       <triangle index="0" v0="0" v1="1" v2="2"/>
//!     </cells>
//!   </mesh>
//! </dolfin>
//! ```
//! - Cell types: `interval`, `triangle`, `tetrahedron`.
//! - Vertex and cell `index` attributes are zero-based and may appear in any
//!   order, but every index below `size` must appear exactly once.
//!
//! # Limitations
//! - Mesh functions and markers (`<data>`, `<domains>`) are skipped.
//! - Only the first `<mesh>` element is read.

use crate::data::coordinates::Coordinates;
use crate::io::{MeshReader, MeshWriter};
use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::connectivity::Connectivity;
use hashbrown::HashMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::io::{BufReader, Read, Write};

const NAMESPACE_DOLFIN: &str = "http://fenicsproject.org";
const AXES: [&str; 3] = ["x", "y", "z"];
const CELL_VERTEX_KEYS: [&str; 4] = ["v0", "v1", "v2", "v3"];

/// DOLFIN XML mesh reader.
#[derive(Debug, Default, Clone)]
pub struct DolfinXmlReader;

/// DOLFIN XML mesh writer.
#[derive(Debug, Default, Clone)]
pub struct DolfinXmlWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    Outside,
    Mesh,
    Vertices,
    Cells,
    Done,
}

/// Table filled by `index` attributes, each index below `size` exactly once.
///
/// Entries are kept sparse until [`IndexedTable::finish`], so the declared
/// `size` never drives an allocation on its own.
struct IndexedTable<T> {
    what: &'static str,
    size: usize,
    entries: HashMap<usize, T>,
}

impl<T> IndexedTable<T> {
    fn new(what: &'static str, size: usize) -> Self {
        Self {
            what,
            size,
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), MeshError> {
        if index >= self.size {
            return Err(MeshError::format(format!(
                "{} index {index} out of range ({})",
                self.what, self.size
            )));
        }
        if self.entries.insert(index, value).is_some() {
            return Err(MeshError::format(format!(
                "duplicate {} index {index}",
                self.what
            )));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<T>, MeshError> {
        if self.entries.len() != self.size {
            let missing = (0..self.size)
                .find(|i| !self.entries.contains_key(i))
                .unwrap_or(self.entries.len());
            return Err(MeshError::format(format!(
                "missing {} with index {missing}",
                self.what
            )));
        }
        (0..self.size)
            .map(|index| {
                self.entries.remove(&index).ok_or_else(|| {
                    MeshError::format(format!("missing {} with index {index}", self.what))
                })
            })
            .collect()
    }
}

fn attr_str(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, MeshError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key.as_bytes() {
            let value = std::str::from_utf8(&attr.value).map_err(|e| {
                MeshError::format(format!("invalid UTF-8 in attribute: {e}"))
            })?;
            return Ok(Some(value.trim().to_string()));
        }
    }
    Ok(None)
}

fn required_attr<T: std::str::FromStr>(
    element: &BytesStart<'_>,
    key: &str,
) -> Result<T, MeshError> {
    let tag = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
    let raw = attr_str(element, key)?.ok_or_else(|| {
        MeshError::format(format!("<{tag}> is missing attribute `{key}`"))
    })?;
    raw.parse::<T>().map_err(|_| {
        MeshError::format(format!("<{tag}> has invalid `{key}` value: {raw}"))
    })
}

impl DolfinXmlReader {
    fn parse_mesh_header(element: &BytesStart<'_>) -> Result<(CellType, usize), MeshError> {
        let name: String = required_attr(element, "celltype")?;
        let cell_type = CellType::from_dolfin_name(&name)
            .ok_or_else(|| MeshError::format(format!("unsupported cell type: {name}")))?;
        let dim: usize = required_attr(element, "dim")?;
        if !(1..=3).contains(&dim) || dim < cell_type.dimension() {
            return Err(MeshError::format(format!(
                "invalid geometric dimension {dim} for {cell_type} cells"
            )));
        }
        Ok((cell_type, dim))
    }

    fn parse_vertex(element: &BytesStart<'_>, dim: usize) -> Result<(usize, Vec<f64>), MeshError> {
        let index: usize = required_attr(element, "index")?;
        let coords = AXES[..dim]
            .iter()
            .map(|axis| required_attr::<f64>(element, axis))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((index, coords))
    }

    fn parse_cell(
        element: &BytesStart<'_>,
        cell_type: CellType,
    ) -> Result<(usize, Vec<usize>), MeshError> {
        let index: usize = required_attr(element, "index")?;
        let verts = CELL_VERTEX_KEYS[..cell_type.num_vertices()]
            .iter()
            .map(|key| required_attr::<usize>(element, key))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((index, verts))
    }
}

impl MeshReader for DolfinXmlReader {
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, MeshError> {
        let mut xml = Reader::from_reader(BufReader::new(reader));
        xml.config_mut().trim_text(true);

        let mut block = Block::Outside;
        let mut header: Option<(CellType, usize)> = None;
        let mut vertices: Option<IndexedTable<Vec<f64>>> = None;
        let mut cells: Option<IndexedTable<Vec<usize>>> = None;
        let mut vertex_rows: Option<Vec<Vec<f64>>> = None;
        let mut cell_rows: Option<Vec<Vec<usize>>> = None;

        let mut buf = Vec::new();
        let mut skip_buf = Vec::new();
        loop {
            let event = xml.read_event_into(&mut buf)?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    let name = e.local_name().as_ref().to_vec();
                    let qname = e.name().as_ref().to_vec();
                    match (block, name.as_slice()) {
                        (Block::Outside, b"dolfin") => {}
                        (Block::Outside, b"mesh") => {
                            header = Some(Self::parse_mesh_header(e)?);
                            block = if is_empty { Block::Done } else { Block::Mesh };
                        }
                        (Block::Mesh, b"vertices") => {
                            let size: usize = required_attr(e, "size")?;
                            vertices = Some(IndexedTable::new("vertex", size));
                            if is_empty {
                                vertex_rows = vertices.take().map(IndexedTable::finish).transpose()?;
                            } else {
                                block = Block::Vertices;
                            }
                        }
                        (Block::Mesh, b"cells") => {
                            let size: usize = required_attr(e, "size")?;
                            cells = Some(IndexedTable::new("cell", size));
                            if is_empty {
                                cell_rows = cells.take().map(IndexedTable::finish).transpose()?;
                            } else {
                                block = Block::Cells;
                            }
                        }
                        (Block::Vertices, b"vertex") => {
                            let dim = header.map(|(_, dim)| dim).unwrap_or(3);
                            let (index, coords) = Self::parse_vertex(e, dim)?;
                            if let Some(table) = vertices.as_mut() {
                                table.insert(index, coords)?;
                            }
                        }
                        (Block::Cells, tag) => {
                            let cell_type = header.map(|(ct, _)| ct).unwrap_or_default();
                            if tag != cell_type.dolfin_name().as_bytes() {
                                return Err(MeshError::format(format!(
                                    "unexpected <{}> in a {cell_type} mesh",
                                    String::from_utf8_lossy(tag)
                                )));
                            }
                            let (index, verts) = Self::parse_cell(e, cell_type)?;
                            if let Some(table) = cells.as_mut() {
                                table.insert(index, verts)?;
                            }
                        }
                        (Block::Done, _) => {
                            if !is_empty {
                                xml.read_to_end_into(QName(&qname), &mut skip_buf)?;
                            }
                        }
                        (_, other) => {
                            log::debug!(
                                "skipping <{}> in DOLFIN XML",
                                String::from_utf8_lossy(other)
                            );
                            if !is_empty {
                                xml.read_to_end_into(QName(&qname), &mut skip_buf)?;
                            }
                        }
                    }
                }
                Event::End(ref e) => match (block, e.local_name().as_ref()) {
                    (Block::Vertices, b"vertices") => {
                        vertex_rows = vertices.take().map(IndexedTable::finish).transpose()?;
                        block = Block::Mesh;
                    }
                    (Block::Cells, b"cells") => {
                        cell_rows = cells.take().map(IndexedTable::finish).transpose()?;
                        block = Block::Mesh;
                    }
                    (Block::Mesh, b"mesh") => block = Block::Done,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
            skip_buf.clear();
        }

        if block != Block::Done {
            return Err(MeshError::format(match header {
                None => "no <mesh> element found".to_string(),
                Some(_) => "unexpected end of file inside <mesh>".to_string(),
            }));
        }
        let (cell_type, dim) =
            header.ok_or_else(|| MeshError::format("no <mesh> element found"))?;
        let vertex_rows = vertex_rows.unwrap_or_default();
        let cell_rows = cell_rows.unwrap_or_default();
        let coordinates = Coordinates::from_rows(dim, &vertex_rows)?;
        let connectivity = Connectivity::try_from_cells(&cell_rows, coordinates.len())?;
        Mesh::try_new(cell_type, coordinates, connectivity)
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), MeshError> {
    writer
        .write_event(event)
        .map_err(|e| MeshError::Io(format!("failed to write DOLFIN XML: {e}")))
}

impl MeshWriter for DolfinXmlWriter {
    fn write<W: Write>(&self, writer: W, mesh: &Mesh) -> Result<(), MeshError> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);
        emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("dolfin");
        root.push_attribute(("xmlns:dolfin", NAMESPACE_DOLFIN));
        emit(&mut xml, Event::Start(root))?;

        let cell_type = mesh.cell_type();
        let dim = mesh.geometric_dimension();
        let mut header = BytesStart::new("mesh");
        header.push_attribute(("celltype", cell_type.dolfin_name()));
        header.push_attribute(("dim", dim.to_string().as_str()));
        emit(&mut xml, Event::Start(header))?;

        let mut vertices = BytesStart::new("vertices");
        vertices.push_attribute(("size", mesh.num_vertices().to_string().as_str()));
        emit(&mut xml, Event::Start(vertices))?;
        for (index, row) in mesh.coordinates().iter().enumerate() {
            let mut vertex = BytesStart::new("vertex");
            vertex.push_attribute(("index", index.to_string().as_str()));
            for (axis, value) in AXES.iter().zip(row) {
                vertex.push_attribute((*axis, value.to_string().as_str()));
            }
            emit(&mut xml, Event::Empty(vertex))?;
        }
        emit(&mut xml, Event::End(BytesEnd::new("vertices")))?;

        let mut cells = BytesStart::new("cells");
        cells.push_attribute(("size", mesh.num_cells().to_string().as_str()));
        emit(&mut xml, Event::Start(cells))?;
        for (index, cone) in mesh.cells().iter().enumerate() {
            let mut cell = BytesStart::new(cell_type.dolfin_name());
            cell.push_attribute(("index", index.to_string().as_str()));
            for (key, v) in CELL_VERTEX_KEYS.iter().zip(cone) {
                cell.push_attribute((*key, v.to_string().as_str()));
            }
            emit(&mut xml, Event::Empty(cell))?;
        }
        emit(&mut xml, Event::End(BytesEnd::new("cells")))?;

        emit(&mut xml, Event::End(BytesEnd::new("mesh")))?;
        emit(&mut xml, Event::End(BytesEnd::new("dolfin")))?;
        xml.into_inner().flush()?;
        Ok(())
    }
}
