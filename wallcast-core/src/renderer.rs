/// Per-frame wall rendering pipeline
///
/// Every face is moved into world space, then into view space, keyed by its
/// farthest endpoint, sorted back to front, clipped against the near plane,
/// projected and finally drawn as a filled, outlined quad (painter's
/// algorithm, no depth buffer).
use crate::camera::Camera;
use crate::color::Color;
use crate::config::RendererConfig;
use crate::geometry::{Face, Mesh};
use crate::surface::Surface;
use crate::vector::{project, rotate_yaw, Vec2, Vec3};

/// View-space depth below which geometry is clipped or dropped.
pub const NEAR_PLANE: f32 = 1.0;

/// A face in view space, ready to be sorted and rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableFace {
    pub p1: Vec3,
    pub p2: Vec3,
    pub color: Color,
    pub sort_depth: f32,
}

/// Screen corners of a projected wall quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenQuad {
    pub top1: Vec2,
    pub top2: Vec2,
    pub bottom1: Vec2,
    pub bottom2: Vec2,
}

/// Counters for a single rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_total: usize,
    pub faces_drawn: usize,
    /// Faces entirely behind the near plane.
    pub faces_culled: usize,
    /// Faces with one endpoint moved onto the near plane.
    pub faces_clipped: usize,
}

/// Result of clipping one face against the near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    Visible(Vec3, Vec3),
    Clipped(Vec3, Vec3),
    Culled,
}

/// Mesh-local point to world space: yaw about the mesh origin, then
/// translate.
pub fn world_transform(point: &Vec3, mesh: &Mesh) -> Vec3 {
    rotate_yaw(point, mesh.rotation) + mesh.position
}

/// World point to view space: the world is moved and turned opposite to the
/// camera.
pub fn view_transform(point: &Vec3, camera: &Camera) -> Vec3 {
    rotate_yaw(&(point - camera.position), -camera.rotation)
}

/// Transform every face of the scene into view space, in scene order.
pub fn collect_faces(scene: &[Mesh], camera: &Camera) -> Vec<RenderableFace> {
    let count = scene.iter().map(|mesh| mesh.faces.len()).sum();
    let mut faces = Vec::with_capacity(count);

    for mesh in scene {
        for face in &mesh.faces {
            faces.push(to_view(face, mesh, camera));
        }
    }

    faces
}

fn to_view(face: &Face, mesh: &Mesh, camera: &Camera) -> RenderableFace {
    let p1 = view_transform(&world_transform(&face.p1, mesh), camera);
    let p2 = view_transform(&world_transform(&face.p2, mesh), camera);

    RenderableFace {
        p1,
        p2,
        color: face.color,
        // Max, not average: a wall reaching from far away to behind the
        // viewer must still sort as far.
        sort_depth: p1.z.max(p2.z),
    }
}

/// Order faces farthest first. Equal depths keep their scene order.
pub fn sort_back_to_front(faces: &mut [RenderableFace]) {
    faces.sort_by(|a, b| b.sort_depth.total_cmp(&a.sort_depth));
}

/// Clip a view-space segment against [`NEAR_PLANE`].
///
/// The replacement endpoint lies on the floor line (`y = 0`); walls are
/// re-extruded to the fixed ceiling and floor after clipping, which only
/// holds because every wall has the same height.
pub fn clip_near(p1: Vec3, p2: Vec3) -> Clip {
    match (p1.z < NEAR_PLANE, p2.z < NEAR_PLANE) {
        (true, true) => Clip::Culled,
        (false, false) => Clip::Visible(p1, p2),
        (true, false) => Clip::Clipped(clip_point(&p1, &p2), p2),
        (false, true) => Clip::Clipped(p1, clip_point(&p2, &p1)),
    }
}

fn clip_point(behind: &Vec3, front: &Vec3) -> Vec3 {
    let t = (NEAR_PLANE - behind.z) / (front.z - behind.z);
    Vec3::new(behind.x + (front.x - behind.x) * t, 0.0, NEAR_PLANE)
}

/// Project the two floor-line endpoints into the four corners of a wall
/// quad.
pub fn project_face(
    p1: &Vec3,
    p2: &Vec3,
    config: &RendererConfig,
    focal_length: f32,
    screen_center: &Vec2,
) -> ScreenQuad {
    let at = |p: &Vec3, y: f32| project(&Vec3::new(p.x, y, p.z), focal_length, screen_center);

    ScreenQuad {
        top1: at(p1, config.ceiling_y),
        top2: at(p2, config.ceiling_y),
        bottom1: at(p1, config.floor_y),
        bottom2: at(p2, config.floor_y),
    }
}

/// Paints wall scenes onto a [`Surface`].
///
/// Holds only the configuration and the cached surface size; each call to
/// [`Renderer::render`] is independent of the previous one.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RendererConfig,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(RendererConfig::default(), width, height)
    }

    pub fn with_config(config: RendererConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Update the surface size. Call whenever the host surface changes,
    /// before the next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "renderer resized");
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    /// Draw one frame of `scene` as seen from `camera`.
    pub fn render<S: Surface + ?Sized>(
        &self,
        scene: &[Mesh],
        camera: &Camera,
        surface: &mut S,
    ) -> FrameStats {
        let _span = tracing::trace_span!("render_frame").entered();

        self.clear(surface);

        let mut faces = collect_faces(scene, camera);
        sort_back_to_front(&mut faces);

        let mut stats = FrameStats {
            faces_total: faces.len(),
            ..FrameStats::default()
        };

        let center = self.screen_center();
        surface.set_stroke_color(self.config.outline_color);
        surface.set_stroke_width(self.config.outline_width);

        for face in &faces {
            let (p1, p2) = match clip_near(face.p1, face.p2) {
                Clip::Culled => {
                    stats.faces_culled += 1;
                    continue;
                }
                Clip::Clipped(p1, p2) => {
                    stats.faces_clipped += 1;
                    (p1, p2)
                }
                Clip::Visible(p1, p2) => (p1, p2),
            };

            let quad = project_face(&p1, &p2, &self.config, camera.fov, &center);
            draw_quad(surface, &quad, face.color);
            stats.faces_drawn += 1;
        }

        tracing::trace!(
            faces_total = stats.faces_total,
            faces_drawn = stats.faces_drawn,
            faces_culled = stats.faces_culled,
            faces_clipped = stats.faces_clipped,
            "frame rendered"
        );

        stats
    }

    /// Floor everywhere, sky over the upper half, horizon line between.
    fn clear<S: Surface + ?Sized>(&self, surface: &mut S) {
        let horizon = self.height / 2.0;

        surface.set_fill_color(self.config.floor_color);
        surface.fill_rect(0.0, 0.0, self.width, self.height);
        surface.set_fill_color(self.config.sky_color);
        surface.fill_rect(0.0, 0.0, self.width, horizon);

        surface.set_stroke_color(self.config.horizon_color);
        surface.set_stroke_width(1.0);
        surface.begin_path();
        surface.move_to(0.0, horizon);
        surface.line_to(self.width, horizon);
        surface.stroke();
    }
}

fn draw_quad<S: Surface + ?Sized>(surface: &mut S, quad: &ScreenQuad, color: Color) {
    surface.set_fill_color(color);
    surface.begin_path();
    surface.move_to(quad.top1.x, quad.top1.y);
    surface.line_to(quad.top2.x, quad.top2.y);
    surface.line_to(quad.bottom2.x, quad.bottom2.y);
    surface.line_to(quad.bottom1.x, quad.bottom1.y);
    surface.close_path();
    surface.fill();
    surface.stroke();
}
