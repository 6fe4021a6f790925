/// wire3d Web - canvas front end for the wireframe pipeline
///
/// Exposes `WebViewer` to JavaScript. The page forwards pointer and key
/// input to it and calls `render` from its animation loop; lines are
/// stroked onto a 2D canvas context.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wire3d_core::{
    load_shape, Connectivity, PanDirection, Pipeline, Shape, ViewCommand, ViewState,
    ViewerConfig,
};

const BACKGROUND: &str = "#000000";
const LINE_COLOR: &str = "#ffffff";
const VERTEX_COLOR: &str = "#ffd200";

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn build_shape(descriptor: &str) -> Result<Shape, JsValue> {
    let (spec, shape) = load_shape(descriptor).map_err(js_error)?;
    log::info!("showing {spec}");
    Ok(shape)
}

/// Pan direction from its lowercase name
pub fn pan_direction(name: &str) -> Option<PanDirection> {
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(PanDirection::Left),
        "right" => Some(PanDirection::Right),
        "up" => Some(PanDirection::Up),
        "down" => Some(PanDirection::Down),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    pipeline: Pipeline,
    shape: Shape,
    view: ViewState,
    connectivity: Connectivity,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the canvas with id `canvas_id`, sized to its pixel buffer
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, descriptor: &str) -> Result<WebViewer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        let config = ViewerConfig::with_canvas(canvas.width(), canvas.height());
        let pipeline = Pipeline::new(config).map_err(js_error)?;

        Ok(WebViewer {
            pipeline,
            shape: build_shape(descriptor)?,
            view: ViewState::new(),
            connectivity: Connectivity::Edges,
            context,
        })
    }

    /// Replace the shape and reset the view
    pub fn set_shape(&mut self, descriptor: &str) -> Result<(), JsValue> {
        self.shape = build_shape(descriptor)?;
        self.view.reset();
        Ok(())
    }

    /// Pointer moved by (dx, dy) pixels while the button is held
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.apply(ViewCommand::Drag { dx, dy });
    }

    pub fn zoom_in(&mut self) {
        self.apply(ViewCommand::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.apply(ViewCommand::ZoomOut);
    }

    /// One pan step: "left", "right", "up" or "down"
    pub fn pan(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction = pan_direction(direction)
            .ok_or_else(|| JsValue::from_str(&format!("unknown direction '{direction}'")))?;
        self.apply(ViewCommand::Pan(direction));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.apply(ViewCommand::Reset);
    }

    /// Switch between real edges and the all-pairs mesh
    pub fn toggle_all_pairs(&mut self) {
        self.connectivity = self.connectivity.toggled();
    }

    /// Draw the current frame. A rejected frame leaves the canvas untouched.
    pub fn render(&self) -> Result<(), JsValue> {
        let frame = self
            .pipeline
            .frame(&self.shape, &self.view, self.connectivity)
            .map_err(js_error)?;

        let config = self.pipeline.config();
        let ctx = &self.context;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(
            0.0,
            0.0,
            f64::from(config.canvas_width),
            f64::from(config.canvas_height),
        );

        ctx.set_stroke_style_str(LINE_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for (from, to) in &frame.segments {
            ctx.move_to(f64::from(from.x), f64::from(from.y));
            ctx.line_to(f64::from(to.x), f64::from(to.y));
        }
        ctx.stroke();

        ctx.set_fill_style_str(VERTEX_COLOR);
        for point in &frame.points {
            ctx.fill_rect(f64::from(point.x) - 1.0, f64::from(point.y) - 1.0, 3.0, 3.0);
        }
        Ok(())
    }

    pub fn angle_x(&self) -> f64 {
        self.view.angle_x
    }

    pub fn angle_y(&self) -> f64 {
        self.view.angle_y
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom
    }
}

impl WebViewer {
    fn apply(&mut self, command: ViewCommand) {
        self.view.apply(command, self.pipeline.config());
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(js_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_direction_names() {
        assert_eq!(pan_direction("left"), Some(PanDirection::Left));
        assert_eq!(pan_direction("UP"), Some(PanDirection::Up));
        assert_eq!(pan_direction("Down"), Some(PanDirection::Down));
        assert_eq!(pan_direction("right"), Some(PanDirection::Right));
        assert_eq!(pan_direction("sideways"), None);
    }
}
