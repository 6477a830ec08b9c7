use wallcast_core::renderer::{clip_near, collect_faces, project_face, Clip};
use wallcast_core::{Camera, Color, CommandRecorder, Level, Mesh, Renderer, RendererConfig, Vec3};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn single_wall() -> Vec<Mesh> {
    let mut mesh = Mesh::new();
    mesh.add_face(
        Vec3::new(-50.0, 0.0, 50.0),
        Vec3::new(50.0, 0.0, 50.0),
        Color::rgb(200, 40, 40),
    );
    vec![mesh]
}

#[test]
fn wall_in_front_of_camera_end_to_end() {
    let scene = single_wall();
    let camera = Camera::new(Vec3::zeros(), 0.0, 400.0);
    let renderer = Renderer::new(WIDTH, HEIGHT);
    let config = renderer.config().clone();

    let faces = collect_faces(&scene, &camera);
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].p1, Vec3::new(-50.0, 0.0, 50.0));
    assert_eq!(faces[0].p2, Vec3::new(50.0, 0.0, 50.0));
    assert_eq!(faces[0].sort_depth, 50.0);

    let (p1, p2) = match clip_near(faces[0].p1, faces[0].p2) {
        Clip::Visible(p1, p2) => (p1, p2),
        other => panic!("wall should not be clipped: {other:?}"),
    };

    let center = renderer.screen_center();
    let quad = project_face(&p1, &p2, &config, camera.fov, &center);
    let w = WIDTH as f32;
    let h = HEIGHT as f32;
    assert!((quad.bottom1.x - (w / 2.0 - 400.0)).abs() < 1e-3);
    assert!((quad.bottom1.y - (h / 2.0 + config.floor_y * 8.0)).abs() < 1e-3);
    assert!((quad.top2.y - (h / 2.0 + config.ceiling_y * 8.0)).abs() < 1e-3);

    let mut surface = CommandRecorder::new();
    let stats = renderer.render(&scene, &camera, &mut surface);
    assert_eq!(stats.faces_drawn, 1);
    assert_eq!(surface.fill_count(), 1);
}

#[test]
fn turning_around_hides_the_wall() {
    let scene = single_wall();
    let camera = Camera::new(Vec3::zeros(), std::f32::consts::PI, 400.0);
    let mut surface = CommandRecorder::new();
    let stats = Renderer::new(WIDTH, HEIGHT).render(&scene, &camera, &mut surface);

    assert_eq!(stats.faces_culled, 1);
    assert_eq!(surface.fill_count(), 0);
}

#[test]
fn custom_extents_change_wall_height() {
    let scene = single_wall();
    let camera = Camera::default();
    let config = RendererConfig {
        ceiling_y: -40.0,
        floor_y: 10.0,
        ..RendererConfig::default()
    };
    let mut surface = CommandRecorder::new();
    Renderer::with_config(config, WIDTH, HEIGHT).render(&scene, &camera, &mut surface);

    let (_, points) = &surface.filled_polygons()[0];
    // 400 / 50 = 8 pixels per unit.
    assert!((points[0].1 - (240.0 - 320.0)).abs() < 1e-3);
    assert!((points[3].1 - (240.0 + 80.0)).abs() < 1e-3);
}

#[test]
fn demo_level_renders_from_spawn() {
    let level = Level::demo().expect("demo map parses");
    let camera = level.spawn_camera(Camera::focal_length_for(WIDTH as f32, 90.0));
    let mut surface = CommandRecorder::new();
    let stats = Renderer::new(WIDTH, HEIGHT).render(&level.meshes, &camera, &mut surface);

    assert_eq!(stats.faces_total, level.face_count());
    assert_eq!(
        stats.faces_drawn + stats.faces_culled,
        stats.faces_total
    );
    assert!(stats.faces_drawn > 0);
    assert_eq!(surface.fill_count(), stats.faces_drawn);
}

#[test]
fn bundled_map_and_config_load() {
    let level = Level::parse(include_str!("../../maps/courtyard.txt"), 40.0).expect("map parses");
    assert_eq!((level.rows, level.cols), (11, 16));
    assert!(!level.is_solid_at(&level.spawn));

    let config = RendererConfig::from_yaml_str(include_str!("../../maps/dusk.yaml"))
        .expect("config parses");
    assert_eq!(config.outline_color, Color::BLACK);
    assert_eq!(config.outline_width, 2.0);
    assert_eq!(config.floor_y, RendererConfig::default().floor_y);
}
