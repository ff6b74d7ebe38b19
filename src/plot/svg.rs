//! SVG renderer.
//!
//! Writes `radius_ratio_histogram.svg` and `mesh.svg` into an output
//! directory. Meshes are drawn as wireframes projected onto the XY plane
//! (1D meshes along the x axis), scaled to fit with their aspect ratio kept.

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::plot::histogram::HistogramSpec;
use crate::plot::{Renderer, wait_for_dismissal};
use std::fmt::Write as _;
use std::fs;
use std::io::{BufRead, Empty};
use std::path::PathBuf;

pub const HISTOGRAM_FILE: &str = "radius_ratio_histogram.svg";
pub const MESH_FILE: &str = "mesh.svg";

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 56.0;

/// Renderer that writes SVG documents.
#[derive(Debug)]
pub struct SvgRenderer<D> {
    output_dir: PathBuf,
    dismiss: Option<D>,
    written: Vec<PathBuf>,
}

impl SvgRenderer<Empty> {
    /// Renderer that never waits for dismissal.
    pub fn headless<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self::new(output_dir, None)
    }
}

impl<D: BufRead> SvgRenderer<D> {
    pub fn new<P: Into<PathBuf>>(output_dir: P, dismiss: Option<D>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dismiss,
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save(&mut self, name: &str, document: &str) -> Result<PathBuf, MeshError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            MeshError::Render(format!("cannot create {}: {e}", self.output_dir.display()))
        })?;
        let path = self.output_dir.join(name);
        fs::write(&path, document)
            .map_err(|e| MeshError::Render(format!("cannot write {}: {e}", path.display())))?;
        log::info!("wrote {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }
}

impl<D: BufRead> Renderer for SvgRenderer<D> {
    fn show_histogram(&mut self, histogram: &HistogramSpec) -> Result<(), MeshError> {
        let document = histogram_svg(histogram);
        let path = self.save(HISTOGRAM_FILE, &document)?;
        if histogram.is_blocking() {
            wait_for_dismissal(
                self.dismiss.as_mut(),
                &format!("Histogram written to {}; press Enter to continue", path.display()),
            )?;
        }
        Ok(())
    }

    fn plot_mesh(&mut self, mesh: &Mesh, title: &str) -> Result<(), MeshError> {
        let document = mesh_svg(mesh, title)?;
        self.save(MESH_FILE, &document)?;
        Ok(())
    }

    fn interactive(&mut self) -> Result<(), MeshError> {
        let listing = self
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        wait_for_dismissal(
            self.dismiss.as_mut(),
            &format!("Plots written to {listing}; press Enter to close"),
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn open_document(out: &mut String, title: &str) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        MARGIN / 2.0,
        escape(title)
    );
}

/// SVG bar chart for `histogram`.
pub fn histogram_svg(histogram: &HistogramSpec) -> String {
    let mut out = String::new();
    open_document(&mut out, &histogram.title);

    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let x0 = MARGIN;
    let y0 = HEIGHT - MARGIN;
    let max_count = histogram.max_count().max(1) as f64;

    for (&centre, &count) in histogram.bins.iter().zip(&histogram.counts) {
        if count == 0 {
            continue;
        }
        let left = (centre - histogram.bar_width / 2.0).clamp(0.0, 1.0);
        let h = count as f64 / max_count * plot_h;
        let _ = writeln!(
            out,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#4c72b0" stroke="#1f3b63" stroke-width="0.5"><title>{centre:.4}: {count}</title></rect>"##,
            x0 + left * plot_w,
            y0 - h,
            histogram.bar_width * plot_w,
            h
        );
    }

    // Axes with ticks at 0, 0.25, .., 1 and at 0 / max count.
    let _ = writeln!(
        out,
        r#"<path d="M {x0} {} L {x0} {y0} L {} {y0}" fill="none" stroke="black"/>"#,
        MARGIN,
        WIDTH - MARGIN
    );
    for i in 0..=4 {
        let t = i as f64 / 4.0;
        let x = x0 + t * plot_w;
        let _ = writeln!(
            out,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="11">{t}</text>"#,
            y0 + 16.0
        );
    }
    let _ = writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="end" font-family="sans-serif" font-size="11">{}</text>"#,
        x0 - 6.0,
        MARGIN + 4.0,
        histogram.max_count()
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="13">{}</text>"#,
        WIDTH / 2.0,
        HEIGHT - 12.0,
        escape(&histogram.x_label)
    );
    let _ = writeln!(
        out,
        r#"<text x="16" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="13" transform="rotate(-90 16 {:.2})">{}</text>"#,
        HEIGHT / 2.0,
        HEIGHT / 2.0,
        escape(&histogram.y_label)
    );
    out.push_str("</svg>\n");
    out
}

/// SVG wireframe of `mesh` projected onto the XY plane.
pub fn mesh_svg(mesh: &Mesh, title: &str) -> Result<String, MeshError> {
    let mut out = String::new();
    open_document(&mut out, title);

    let Some((lo, hi)) = mesh.coordinates().bounding_box() else {
        out.push_str("</svg>\n");
        return Ok(out);
    };
    let span_x = (hi[0] - lo[0]).max(f64::MIN_POSITIVE);
    let span_y = hi[1] - lo[1];
    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let scale = if span_y > 0.0 {
        (plot_w / span_x).min(plot_h / span_y)
    } else {
        plot_w / span_x
    };
    // Centre the drawing in the plot area.
    let off_x = MARGIN + (plot_w - span_x * scale) / 2.0;
    let off_y = MARGIN + (plot_h - span_y * scale) / 2.0;
    let project = |p: [f64; 3]| {
        (
            off_x + (p[0] - lo[0]) * scale,
            off_y + (hi[1] - p[1]) * scale,
        )
    };

    let coords = mesh.coordinates();
    let mut path = String::new();
    for (a, b) in mesh.cells().edges() {
        let (ax, ay) = project(coords.try_point(a)?);
        let (bx, by) = project(coords.try_point(b)?);
        let _ = write!(path, "M {ax:.2} {ay:.2} L {bx:.2} {by:.2} ");
    }
    let _ = writeln!(
        out,
        r##"<path d="{}" fill="none" stroke="#1f3b63" stroke-width="0.6"/>"##,
        path.trim_end()
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="11">{} {} cells, {} vertices</text>"#,
        WIDTH / 2.0,
        HEIGHT - 12.0,
        mesh.num_cells(),
        mesh.cell_type(),
        mesh.num_vertices()
    );
    out.push_str("</svg>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::unit_square_mesh;
    use crate::plot::histogram::radius_ratio_histogram;
    use crate::test_util::Scratch;
    use std::io::Cursor;

    #[test]
    fn histogram_has_one_bar_per_non_empty_bin() {
        let mesh = unit_square_mesh(3, 2).unwrap();
        let hist = radius_ratio_histogram(&mesh, 20).unwrap();
        let svg = histogram_svg(&hist);
        let bars = svg.matches("<rect x=").count();
        let non_empty = hist.counts.iter().filter(|&&c| c > 0).count();
        assert_eq!(bars, non_empty);
        assert!(svg.contains("radius ratio"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn mesh_wireframe_draws_every_edge() {
        let mesh = unit_square_mesh(2, 2).unwrap();
        let svg = mesh_svg(&mesh, "a <b> & c").unwrap();
        // 2x2 squares split once: 12 grid edges + 4 diagonals.
        assert_eq!(svg.matches(" L ").count(), 16);
        assert!(svg.contains("a &lt;b&gt; &amp; c"));
    }

    #[test]
    fn renderer_writes_files_and_waits_only_when_blocking() {
        let dir = Scratch::new("renderer");
        let mesh = unit_square_mesh(2, 2).unwrap();
        let hist = radius_ratio_histogram(&mesh, 10).unwrap();

        let mut input = Cursor::new("\n\n");
        let mut renderer = SvgRenderer::new(dir.to_path_buf(), Some(&mut input));
        renderer.show_histogram(&hist.clone().non_blocking()).unwrap();
        renderer.plot_mesh(&mesh, "unit square").unwrap();
        assert_eq!(
            renderer.written(),
            &[dir.join(HISTOGRAM_FILE), dir.join(MESH_FILE)]
        );
        renderer.interactive().unwrap();
        drop(renderer);
        // The non-blocking histogram left one line unread.
        assert_eq!(input.position(), 1);

        let mut headless = SvgRenderer::headless(dir.to_path_buf());
        headless.show_histogram(&hist).unwrap();
        headless.interactive().unwrap();
        assert!(dir.join(HISTOGRAM_FILE).exists());
    }
}
