/// Example: Print a single frame of a shape as ASCII art
///
/// Usage: cargo run --example snapshot -- "sphere 150 rings=10" 30 45
use std::env;
use std::io;
use wire3d_core::{load_shape, Connectivity, Pipeline, ViewState};
use wire3d_terminal::LineRenderer;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let descriptor = args.get(1).map(String::as_str).unwrap_or("cube 100");
    let angle = |i: usize| args.get(i).and_then(|a| a.parse::<f64>().ok()).unwrap_or(0.0);

    let (spec, shape) =
        load_shape(descriptor).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pipeline = Pipeline::default();
    let view = ViewState {
        angle_x: angle(2),
        angle_y: angle(3),
        ..ViewState::new()
    };
    let frame = pipeline
        .frame(&shape, &view, Connectivity::Edges)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let config = pipeline.config();
    let mut renderer = LineRenderer::new(80, 40, config.canvas_width, config.canvas_height);
    renderer.draw_frame(&frame);

    println!("{spec}");
    print!("{}", renderer.to_text());
    Ok(())
}
