use collage_wasm::camera::{OrbitControls, PerspectiveCamera, Viewport};
use collage_wasm::config::PageConfig;
use glam::Vec3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn resize_updates_aspect_and_surface() {
    let config = PageConfig::default();
    let mut camera = PerspectiveCamera::new(&config.camera, Viewport::new(1920.0, 1080.0, 1.0).aspect());

    let samples = [(1920.0, 1080.0, 1.0), (1080.0, 1920.0, 1.0), (800.0, 600.0, 2.0), (375.0, 812.0, 3.0)];
    for &(w, h, dpr) in &samples {
        let viewport = Viewport::new(w, h, dpr);
        camera.set_aspect(viewport.aspect());
        assert!(approx(camera.aspect, (w / h) as f32), "{w}x{h}");

        let ratio = dpr.min(config.max_pixel_ratio);
        let (bw, bh) = viewport.drawing_buffer_size(config.max_pixel_ratio);
        assert_eq!((bw, bh), ((w * ratio) as u32, (h * ratio) as u32), "{w}x{h}@{dpr}");
    }
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(Viewport::new(10.0, 10.0, 3.0).pixel_ratio(2.0), 2.0);
    assert_eq!(Viewport::new(10.0, 10.0, 1.5).pixel_ratio(2.0), 1.5);
    assert_eq!(Viewport::new(10.0, 0.0, 1.0).aspect(), 1.0);
}

#[test]
fn zoomed_out_ratio_shrinks_the_backing_store() {
    let viewport = Viewport::new(1280.0, 720.0, 0.5);
    assert_eq!(viewport.pixel_ratio(2.0), 0.5);
    assert_eq!(viewport.drawing_buffer_size(2.0), (640, 360));
}

#[test]
fn camera_sits_on_its_rig() {
    let config = PageConfig::default();
    let camera = PerspectiveCamera::new(&config.camera, 1.5);
    assert_eq!(camera.world_position(), Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(camera.fov_y_degrees, 45.0);
    assert_eq!((camera.near, camera.far), (0.1, 100.0));

    // a point straight ahead projects to the centre of the screen
    let clip = camera.view_projection() * Vec3::new(0.0, 0.0, -10.0).extend(1.0);
    assert!(approx(clip.x / clip.w, 0.0) && approx(clip.y / clip.w, 0.0));
    assert!(clip.z / clip.w > -1.0 && clip.z / clip.w < 1.0);
}

#[test]
fn disabled_orbit_controls_leave_camera_alone() {
    let config = PageConfig::default();
    let mut camera = PerspectiveCamera::new(&config.camera, 1.0);
    let mut controls = OrbitControls::new(config.orbit);
    assert!(!controls.enabled);
    controls.rotate_by_pointer(50.0, 50.0);
    assert!(!controls.update(&mut camera));
    assert_eq!(camera.position, Vec3::ZERO);
}

#[test]
fn orbit_distance_and_polar_angle_are_clamped() {
    let mut config = PageConfig::default();
    config.orbit.enabled = true;
    let mut camera = PerspectiveCamera::new(&config.camera, 1.0);
    let mut controls = OrbitControls::new(config.orbit);

    for _ in 0..200 {
        controls.rotate_by_pointer(10.0, 40.0);
        controls.update(&mut camera);

        let offset = camera.position - camera.target;
        let distance = offset.length();
        assert!(distance >= 12.0 - 1e-3 && distance <= 80.0 + 1e-3, "distance {distance}");
        // never below the horizon
        assert!(offset.y >= -1e-3, "offset {offset:?}");
    }
}
