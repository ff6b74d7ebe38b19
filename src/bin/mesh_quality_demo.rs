//! mesh-quality-demo: radius-ratio quality report for a simplicial mesh.

use clap::{Parser, ValueEnum};
use mesh_quality::mesh_error::MeshError;
use mesh_quality::pipeline::{self, DEFAULT_MESH_PATH, PipelineConfig};
use mesh_quality::plot::DEFAULT_NUM_BINS;
use mesh_quality::plot::svg::SvgRenderer;
use mesh_quality::plot::terminal::TerminalRenderer;
use std::io::{self, StdinLock};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RendererKind {
    Svg,
    Terminal,
}

#[derive(Parser)]
#[command(name = "mesh-quality-demo")]
#[command(version, about = "Report the radius-ratio quality of a mesh and plot its histogram")]
struct Cli {
    /// Mesh file (.xml, .xml.gz, .msh, .msh.gz).
    #[arg(default_value = DEFAULT_MESH_PATH)]
    mesh: PathBuf,

    /// Number of histogram bins.
    #[arg(short, long, default_value_t = DEFAULT_NUM_BINS)]
    bins: usize,

    /// Where plots are displayed.
    #[arg(short, long, value_enum, default_value = "svg")]
    renderer: RendererKind,

    /// Directory for SVG output.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write the histogram specification as JSON.
    #[arg(long)]
    histogram_json: Option<PathBuf>,

    /// Do not wait for the plots to be dismissed.
    #[arg(long)]
    no_wait: bool,
}

fn run(cli: Cli) -> Result<(), MeshError> {
    let config = PipelineConfig {
        mesh_path: cli.mesh,
        num_bins: cli.bins,
        histogram_json: cli.histogram_json,
        ..PipelineConfig::default()
    };
    let dismiss: Option<StdinLock<'static>> = (!cli.no_wait).then(|| io::stdin().lock());
    let mut stdout = io::stdout().lock();

    let report = match cli.renderer {
        RendererKind::Svg => {
            let mut renderer = SvgRenderer::new(cli.output_dir, dismiss);
            pipeline::run(&config, &mut renderer, &mut stdout)?
        }
        RendererKind::Terminal => {
            let mut renderer = TerminalRenderer::new(io::stdout(), dismiss);
            pipeline::run(&config, &mut renderer, &mut stdout)?
        }
    };
    log::debug!("{report:?}");
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
