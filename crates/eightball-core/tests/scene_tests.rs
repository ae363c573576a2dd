use eightball_core::mesh::{project_decal, uv_sphere, DecalProjector};
use eightball_core::{
    build_scene, Camera, MeshRole, TextureSlot, GLYPH_DECAL_SIZE, PROMPT_DECAL_SIZE,
};
use glam::{Mat4, Quat, Vec3};

#[test]
fn uv_sphere_counts_and_radius() {
    let (seg, rings) = (16, 12);
    let m = uv_sphere(seg, rings);
    assert_eq!(m.vertices.len(), ((seg + 1) * (rings + 1)) as usize);
    assert_eq!(m.triangle_count(), (seg * rings * 2) as usize);
    for v in &m.vertices {
        let p = Vec3::from(v.pos);
        assert!((p.length() - 1.0).abs() < 1e-5);
        assert!((Vec3::from(v.nrm) - p).length() < 1e-5);
        assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
    }
    let max = m.vertices.len() as u32;
    assert!(m.indices.iter().all(|&i| i < max));
}

#[test]
fn sphere_triangles_face_outward() {
    let m = uv_sphere(24, 16);
    for tri in m.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(m.vertices[i as usize].pos));
        let n = (b - a).cross(c - a);
        if n.length() < 1e-6 {
            continue; // degenerate at the poles
        }
        let centroid = (a + b + c) / 3.0;
        assert!(n.dot(centroid) > 0.0);
    }
}

fn front_projector(size: Vec3) -> DecalProjector {
    DecalProjector {
        position: Vec3::new(0.0, 0.0, 1.0),
        orientation: Quat::IDENTITY,
        size,
    }
}

#[test]
fn decal_stays_inside_projector_box() {
    let sphere = uv_sphere(32, 24);
    let size = GLYPH_DECAL_SIZE;
    let decal = project_decal(&sphere, Mat4::IDENTITY, &front_projector(size));
    assert!(decal.triangle_count() > 0);
    let half = size * 0.5 + Vec3::splat(1e-4);
    for v in &decal.vertices {
        let p = Vec3::from(v.pos) - Vec3::new(0.0, 0.0, 1.0);
        assert!(p.abs().cmple(half).all(), "vertex outside box: {:?}", p);
        assert!(v.pos[2] > 0.0, "decal on the back face");
        let [u, w] = v.uv;
        assert!((-1e-4..=1.0001).contains(&u) && (-1e-4..=1.0001).contains(&w));
    }
}

#[test]
fn decal_vertices_lie_on_the_sphere() {
    let sphere = uv_sphere(64, 48);
    let decal = project_decal(&sphere, Mat4::IDENTITY, &front_projector(PROMPT_DECAL_SIZE));
    for v in &decal.vertices {
        let r = Vec3::from(v.pos).length();
        // clipped points sit on flat facets, slightly inside the unit sphere
        assert!(r <= 1.0 + 1e-4 && r > 0.99, "radius {r}");
    }
}

#[test]
fn decal_uv_matches_projector_axes() {
    let sphere = uv_sphere(64, 48);
    let decal = project_decal(&sphere, Mat4::IDENTITY, &front_projector(GLYPH_DECAL_SIZE));
    for v in &decal.vertices {
        let expect_u = 0.5 + v.pos[0] / GLYPH_DECAL_SIZE.x;
        let expect_v = 0.5 - v.pos[1] / GLYPH_DECAL_SIZE.y;
        assert!((v.uv[0] - expect_u).abs() < 1e-4);
        assert!((v.uv[1] - expect_v).abs() < 1e-4);
    }
}

#[test]
fn decal_follows_base_transform() {
    let sphere = uv_sphere(32, 24);
    // Base pushed back so the projector box no longer reaches it.
    let moved = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
    let decal = project_decal(&sphere, moved, &front_projector(GLYPH_DECAL_SIZE));
    assert_eq!(decal.triangle_count(), 0);
}

#[test]
fn scene_has_one_sphere_and_two_faces() {
    let scene = build_scene();
    assert_eq!(scene.meshes.len(), 3);
    assert_eq!(scene.root, Mat4::IDENTITY);

    let sphere = scene.mesh(MeshRole::Sphere).map(|m| m.material);
    let glyph = scene.mesh(MeshRole::GlyphDecal).map(|m| m.material);
    let prompt = scene.mesh(MeshRole::PromptDecal).map(|m| m.material);
    let (Some(sphere), Some(glyph), Some(prompt)) = (sphere, glyph, prompt) else {
        panic!("missing mesh role");
    };
    assert!(!sphere.transparent && sphere.map.is_none());
    assert_eq!(glyph.map, Some(TextureSlot::Glyph));
    assert_eq!(prompt.map, Some(TextureSlot::Prompt));
    assert!(glyph.transparent && prompt.transparent);
    assert_eq!(glyph.opacity, 1.0);
    assert_eq!(prompt.opacity, 0.0);
    assert!(sphere.clearcoat > 0.5 && sphere.roughness < 0.5);
}

#[test]
fn lights_point_from_their_positions() {
    let scene = build_scene();
    for light in scene.lights.directional() {
        let d = light.direction();
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!(d.dot(light.position) > 0.0);
        assert!(light.radiance().max_element() > 0.0);
    }
}

#[test]
fn camera_frames_the_ball() {
    let cam = Camera::for_aspect(1.0);
    let vp = cam.view_proj();
    for p in [Vec3::X, -Vec3::X, Vec3::Y * 1.4, -Vec3::Y * 1.2, Vec3::ZERO] {
        let clip = vp * p.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{p:?} -> {ndc:?}");
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
