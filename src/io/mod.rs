//! Mesh I/O helpers.
//!
//! This module provides trait-based readers and writers for [`Mesh`] plus
//! path-based [`load_mesh`] / [`save_mesh`] that pick the format from the file
//! name and transparently handle gzip compression (`*.gz`).
//!
//! | Suffix | Format |
//! |---|---|
//! | `.xml`, `.xml.gz` | DOLFIN XML ([`dolfin_xml`]) |
//! | `.msh`, `.msh.gz` | Gmsh ASCII 2.2 ([`gmsh`]) |

pub mod dolfin_xml;
pub mod gmsh;

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Trait for mesh readers.
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Mesh, MeshError>;
}

/// Trait for mesh writers.
pub trait MeshWriter {
    /// Serialize a mesh to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &Mesh) -> Result<(), MeshError>;
}

/// On-disk mesh formats recognised by [`load_mesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    DolfinXml,
    Gmsh,
}

/// Format and compression inferred from a file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatHint {
    pub format: MeshFormat,
    pub gzip: bool,
}

impl FormatHint {
    /// Infer the format from the file name of `path`.
    pub fn from_path(path: &Path) -> Result<Self, MeshError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                MeshError::format(format!("cannot infer mesh format of {}", path.display()))
            })?;
        let (stem, gzip) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };
        let format = if stem.ends_with(".xml") {
            MeshFormat::DolfinXml
        } else if stem.ends_with(".msh") {
            MeshFormat::Gmsh
        } else {
            return Err(MeshError::format(format!(
                "unrecognised mesh file extension: {}",
                path.display()
            )));
        };
        Ok(Self { format, gzip })
    }
}

/// Read a mesh of the given format, decompressing first when `gzip` is set.
pub fn read_mesh<R: Read>(reader: R, hint: FormatHint) -> Result<Mesh, MeshError> {
    if hint.gzip {
        read_plain(GzDecoder::new(reader), hint.format)
    } else {
        read_plain(reader, hint.format)
    }
}

fn read_plain<R: Read>(reader: R, format: MeshFormat) -> Result<Mesh, MeshError> {
    match format {
        MeshFormat::DolfinXml => dolfin_xml::DolfinXmlReader::default().read(reader),
        MeshFormat::Gmsh => gmsh::GmshReader::default().read(reader),
    }
}

/// Load a mesh from disk.
///
/// A missing file yields [`MeshError::ResourceNotFound`]; malformed content
/// (including a corrupt gzip stream) yields [`MeshError::Format`].
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let hint = FormatHint::from_path(path)?;
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MeshError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::from(e)
        }
    })?;
    log::info!("loading {:?} mesh from {}", hint.format, path.display());
    let mesh = read_mesh(BufReader::new(file), hint).map_err(|err| match err {
        // Decompression failures surface as I/O errors from the decoder.
        MeshError::Io(msg) if hint.gzip => {
            MeshError::format(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;
    log::info!(
        "loaded mesh: {} vertices, {} {} cells, geometric dimension {}",
        mesh.num_vertices(),
        mesh.num_cells(),
        mesh.cell_type(),
        mesh.geometric_dimension()
    );
    Ok(mesh)
}

/// Save a mesh as DOLFIN XML, gzip-compressed when the path ends in `.gz`.
pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<(), MeshError> {
    let path = path.as_ref();
    let hint = FormatHint::from_path(path)?;
    if hint.format != MeshFormat::DolfinXml {
        return Err(MeshError::format(format!(
            "only DOLFIN XML output is supported, got {}",
            path.display()
        )));
    }
    let file = BufWriter::new(File::create(path)?);
    let writer = dolfin_xml::DolfinXmlWriter::default();
    if hint.gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        writer.write(&mut encoder, mesh)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        writer.write(&mut file, mesh)?;
        file.flush()?;
    }
    log::debug!("saved {} cells to {}", mesh.num_cells(), path.display());
    Ok(())
}
