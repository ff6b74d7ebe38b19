//! Text renderer for terminals and logs.
//!
//! Histograms are drawn as rows of `#` bars over the range of non-empty bins,
//! scaled so the tallest bar is [`BAR_WIDTH`] characters. Meshes are reported
//! as a one-line summary.

use crate::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::plot::histogram::HistogramSpec;
use crate::plot::{Renderer, wait_for_dismissal};
use std::io::{BufRead, Empty, Write};

/// Characters in the longest bar.
pub const BAR_WIDTH: usize = 50;

#[derive(Debug)]
pub struct TerminalRenderer<W, D> {
    out: W,
    dismiss: Option<D>,
}

impl<W: Write> TerminalRenderer<W, Empty> {
    /// Renderer that never waits for dismissal.
    pub fn headless(out: W) -> Self {
        Self::new(out, None)
    }
}

impl<W: Write, D: BufRead> TerminalRenderer<W, D> {
    pub fn new(out: W, dismiss: Option<D>) -> Self {
        Self { out, dismiss }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn bar_len(count: usize, max_count: usize) -> usize {
    if count == 0 || max_count == 0 {
        return 0;
    }
    // Round up so every non-empty bin shows at least one mark.
    (count * BAR_WIDTH).div_ceil(max_count)
}

impl<W: Write, D: BufRead> Renderer for TerminalRenderer<W, D> {
    fn show_histogram(&mut self, histogram: &HistogramSpec) -> Result<(), MeshError> {
        writeln!(self.out, "{}", histogram.title)?;
        let first = histogram.counts.iter().position(|&c| c > 0);
        let last = histogram.counts.iter().rposition(|&c| c > 0);
        match first.zip(last) {
            None => writeln!(self.out, "  (no {})", histogram.y_label)?,
            Some((first, last)) => {
                let max_count = histogram.max_count();
                let half = histogram.bar_width / 2.0;
                let rows = histogram.bins.iter().zip(&histogram.counts);
                for (&centre, &count) in rows.take(last + 1).skip(first) {
                    writeln!(
                        self.out,
                        "  [{:.3}, {:.3}) {:>7} {}",
                        centre - half,
                        centre + half,
                        count,
                        "#".repeat(bar_len(count, max_count))
                    )?;
                }
            }
        }
        writeln!(
            self.out,
            "  {}: {} total, x: {}",
            histogram.y_label,
            histogram.total(),
            histogram.x_label
        )?;
        self.out.flush()?;
        if histogram.is_blocking() {
            wait_for_dismissal(self.dismiss.as_mut(), "Press Enter to continue")?;
        }
        Ok(())
    }

    fn plot_mesh(&mut self, mesh: &Mesh, title: &str) -> Result<(), MeshError> {
        write!(
            self.out,
            "{title}: {} {} cells, {} vertices",
            mesh.num_cells(),
            mesh.cell_type(),
            mesh.num_vertices()
        )?;
        if let Some((lo, hi)) = mesh.coordinates().bounding_box() {
            let dim = mesh.geometric_dimension();
            write!(
                self.out,
                ", bounding box {:?} .. {:?}",
                &lo[..dim],
                &hi[..dim]
            )?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn interactive(&mut self) -> Result<(), MeshError> {
        wait_for_dismissal(self.dismiss.as_mut(), "Press Enter to close")
    }
}
