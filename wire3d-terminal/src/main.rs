/// wire3d - Interactive wireframe viewer for the terminal
///
/// Controls:
///   - Left drag: rotate the shape
///   - Arrow keys: move the shape
///   - +/- or mouse wheel: zoom
///   - r: reset the view
///   - m: toggle all-pairs mesh mode
///   - q/Esc: quit
///
/// Logs go to stderr: `RUST_LOG=debug wire3d 2> wire3d.log`
use clap::Parser;
use std::io;
use std::path::PathBuf;
use wire3d_core::{parse_shape, Connectivity, Pipeline, PixelSnap, ShapeSpec, ViewerConfig};
use wire3d_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "wire3d", version, about = "Interactive wireframe shape viewer")]
struct Args {
    /// Shape to view, e.g. "cube 100", "cylinder radius=80 height=150"
    /// or "sphere 120 rings=12 segments=24"
    #[arg(short, long, default_value = "cube 100", value_parser = parse_shape)]
    shape: ShapeSpec,

    /// JSON viewer config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera distance used in the perspective divide
    #[arg(long)]
    focal: Option<f64>,

    /// Degrees of rotation per pixel dragged
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Zoom factor per key press
    #[arg(long)]
    zoom_step: Option<f64>,

    /// Pixels moved per arrow key press
    #[arg(long)]
    pan_step: Option<f64>,

    /// Round projected points to the nearest pixel instead of truncating
    #[arg(long)]
    round: bool,

    /// Connect every pair of points instead of the shape's edges
    #[arg(long)]
    all_pairs: bool,
}

impl Args {
    fn viewer_config(&self) -> io::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            None => ViewerConfig::default(),
        };

        if let Some(focal) = self.focal {
            config.focal_length = focal;
        }
        if let Some(sensitivity) = self.sensitivity {
            config.drag_sensitivity = sensitivity;
        }
        if let Some(step) = self.zoom_step {
            config.zoom_step = step;
        }
        if let Some(step) = self.pan_step {
            config.pan_step = step;
        }
        if self.round {
            config.pixel_snap = PixelSnap::Round;
        }

        Ok(config)
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.viewer_config()?;
    let pipeline =
        Pipeline::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let connectivity = if args.all_pairs {
        Connectivity::AllPairs
    } else {
        Connectivity::Edges
    };

    println!("wire3d - Loading {}...", args.shape);

    let mut app = TerminalApp::new(pipeline, args.shape, connectivity)?;
    app.run()?;

    println!("Thank you for using wire3d!");
    Ok(())
}
