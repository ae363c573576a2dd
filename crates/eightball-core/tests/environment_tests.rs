use eightball_core::environment::{
    bake_environment, equirect_direction, project_irradiance, EnvironmentBake, RoomEnvironment,
    RADIANCE_HEIGHT, RADIANCE_WIDTH,
};
use glam::Vec3;
use std::f32::consts::PI;

fn bake_from(coeffs: [Vec3; 9]) -> EnvironmentBake {
    EnvironmentBake {
        irradiance_sh: coeffs,
        radiance_width: 0,
        radiance_height: 0,
        radiance_rgba8: Vec::new(),
    }
}

#[test]
fn uniform_sky_gives_pi_irradiance_everywhere() {
    let bake = bake_from(project_irradiance(|_| Vec3::ONE, 96, 48));
    for n in [Vec3::X, Vec3::Y, -Vec3::Y, Vec3::new(1.0, 1.0, -1.0).normalize()] {
        let e = bake.irradiance(n);
        assert!((e - Vec3::splat(PI)).abs().max_element() < 1e-2, "{n:?} -> {e:?}");
    }
}

#[test]
fn equirect_directions_are_unit_and_span_poles() {
    let (w, h) = (RADIANCE_WIDTH, RADIANCE_HEIGHT);
    for (x, y) in [(0, 0), (w / 2, h / 2), (w - 1, h - 1), (17, 40)] {
        let d = equirect_direction(x, y, w, h);
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
    assert!(equirect_direction(0, 0, w, h).y > 0.99);
    assert!(equirect_direction(0, h - 1, w, h).y < -0.99);
}

#[test]
fn room_bake_has_expected_sizes() {
    let bake = bake_environment(&RoomEnvironment::default());
    assert_eq!(bake.radiance_width, RADIANCE_WIDTH);
    assert_eq!(bake.radiance_height, RADIANCE_HEIGHT);
    assert_eq!(
        bake.radiance_rgba8.len(),
        (RADIANCE_WIDTH * RADIANCE_HEIGHT * 4) as usize
    );
    assert!(bake.radiance_rgba8.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn room_is_lit_from_above() {
    let room = RoomEnvironment::default();
    let bake = bake_environment(&room);
    let up = bake.irradiance(Vec3::Y);
    let down = bake.irradiance(-Vec3::Y);
    assert!(up.element_sum() > down.element_sum(), "{up:?} vs {down:?}");
    assert!(down.min_element() > 0.0);
    assert!(room.radiance(Vec3::Y).x > room.radiance(-Vec3::Y).x);
}
