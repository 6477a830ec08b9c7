/// wallcast Web - the wall renderer on an HTML canvas
///
/// The drawing surface maps one to one onto `CanvasRenderingContext2d`, so
/// this crate is only glue: a [`Surface`] implementation and a JS-facing
/// view that owns the level, camera and renderer.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wallcast_core::level::DEFAULT_CELL_SIZE;
use wallcast_core::vector::normalize_or_zero;
use wallcast_core::{Camera, Color, Level, Renderer, RendererConfig, Surface, Vec3};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const DEFAULT_FOV_DEGREES: f32 = 75.0;

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl Surface for CanvasSurface {
    fn set_fill_color(&mut self, color: Color) {
        self.context.set_fill_style_str(&color.to_string());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.context.set_stroke_style_str(&color.to_string());
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.context.set_line_width(width as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.context
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.context.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.context.line_to(x as f64, y as f64);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A level rendered onto one canvas element
#[wasm_bindgen]
pub struct WebView {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    renderer: Renderer,
    level: Level,
    camera: Camera,
    fov_degrees: f32,
}

#[wasm_bindgen]
impl WebView {
    /// Attach to the canvas with the given element id and load the demo map
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebView, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let level = Level::demo().map_err(js_error)?;
        let renderer = Renderer::new(canvas.width(), canvas.height());
        let camera = level.spawn_camera(Camera::focal_length_for(
            canvas.width() as f32,
            DEFAULT_FOV_DEGREES,
        ));

        Ok(WebView {
            canvas,
            surface: CanvasSurface::new(context),
            renderer,
            level,
            camera,
            fov_degrees: DEFAULT_FOV_DEGREES,
        })
    }

    /// Resize the canvas backing store and the renderer together
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.resize(width, height);
        self.camera.fov = Camera::focal_length_for(width as f32, self.fov_degrees);
    }

    /// Replace the level with an ASCII map and move the camera to its spawn
    pub fn load_map(&mut self, text: &str) -> Result<(), JsValue> {
        self.level = Level::parse(text, DEFAULT_CELL_SIZE).map_err(js_error)?;
        tracing::debug!(faces = self.level.face_count(), "map loaded");
        self.camera = self.level.spawn_camera(self.camera.fov);
        Ok(())
    }

    /// Replace the renderer config with a YAML document
    pub fn load_config(&mut self, yaml: &str) -> Result<(), JsValue> {
        let config = RendererConfig::from_yaml_str(yaml).map_err(js_error)?;
        self.renderer.set_config(config);
        Ok(())
    }

    pub fn set_camera(&mut self, x: f32, z: f32, yaw: f32) {
        self.camera.position.x = x;
        self.camera.position.z = z;
        self.camera.rotation = yaw;
    }

    /// Move along the view direction, refusing to enter blocks
    pub fn move_forward(&mut self, distance: f32) -> bool {
        let target = self.camera.position + normalize_or_zero(&self.camera.forward()) * distance;
        self.try_move(target)
    }

    /// Move sideways, positive to the right
    pub fn strafe(&mut self, distance: f32) -> bool {
        let target = self.camera.position + normalize_or_zero(&self.camera.right()) * distance;
        self.try_move(target)
    }

    /// Turn the view; positive radians turn left, negative turn right
    pub fn turn(&mut self, radians: f32) {
        self.camera.rotation += radians;
    }

    /// Draw one frame and return the number of walls drawn
    pub fn render(&mut self) -> u32 {
        let stats = self
            .renderer
            .render(&self.level.meshes, &self.camera, &mut self.surface);
        stats.faces_drawn as u32
    }
}

impl WebView {
    fn try_move(&mut self, target: Vec3) -> bool {
        let free = self.level.is_free_with_radius(&target, 6.0);
        if free {
            self.camera.position = target;
        }
        free
    }
}
