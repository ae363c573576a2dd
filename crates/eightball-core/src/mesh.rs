use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unit UV sphere centered on the origin, +Y up.
pub fn uv_sphere(segments: u32, rings: u32) -> MeshData {
    let seg = segments.max(3);
    let rng = rings.max(2);
    let mut vertices = Vec::with_capacity(((seg + 1) * (rng + 1)) as usize);
    for y in 0..=rng {
        let v = y as f32 / rng as f32;
        let phi = v * PI;
        for x in 0..=seg {
            let u = x as f32 / seg as f32;
            let theta = u * 2.0 * PI;
            let n = Vec3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            vertices.push(Vertex {
                pos: n.to_array(),
                nrm: n.to_array(),
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((seg * rng * 6) as usize);
    let stride = seg + 1;
    for y in 0..rng {
        for x in 0..seg {
            let a = y * stride + x;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            // Counter-clockwise seen from outside.
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }
    MeshData { vertices, indices }
}

/// Box projector for a decal: centered at `position`, looking down its
/// local -Z, covering `size` (width, height, depth).
#[derive(Clone, Copy, Debug)]
pub struct DecalProjector {
    pub position: Vec3,
    pub orientation: Quat,
    pub size: Vec3,
}

impl DecalProjector {
    fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

#[derive(Clone, Copy)]
struct ClipVertex {
    pos: Vec3, // projector space
    nrm: Vec3, // mesh space
}

impl ClipVertex {
    fn lerp(&self, other: &ClipVertex, t: f32) -> ClipVertex {
        ClipVertex {
            pos: self.pos.lerp(other.pos, t),
            nrm: self.nrm.lerp(other.nrm, t),
        }
    }
}

/// Projects a decal onto `base` placed at `base_transform`.
///
/// Each base triangle is moved into projector space, clipped against the six
/// faces of the projector box, and re-emitted in base-local space with UVs
/// taken from projector x/y. The result has to be recomputed whenever the
/// base transform changes, so callers build it after that transform is
/// final.
pub fn project_decal(base: &MeshData, base_transform: Mat4, projector: &DecalProjector) -> MeshData {
    let proj = projector.matrix();
    let to_projector = proj.inverse() * base_transform;
    let from_projector = base_transform.inverse() * proj;
    let normal_matrix = Mat3::from_mat4(base_transform).inverse().transpose();
    let half = projector.size * 0.5;
    let facing = projector.orientation * Vec3::Z;

    let mut out = MeshData::default();
    let mut poly: Vec<ClipVertex> = Vec::with_capacity(9);
    let mut scratch: Vec<ClipVertex> = Vec::with_capacity(9);

    for tri in base.indices.chunks_exact(3) {
        poly.clear();
        for &i in tri {
            let v = &base.vertices[i as usize];
            poly.push(ClipVertex {
                pos: to_projector.transform_point3(Vec3::from(v.pos)),
                nrm: Vec3::from(v.nrm),
            });
        }
        // Skip faces turned away from the projector.
        let world_n = (normal_matrix * poly[0].nrm).normalize_or_zero();
        if world_n.dot(facing) <= 0.0 {
            continue;
        }
        for axis in 0..3 {
            for sign in [1.0_f32, -1.0] {
                clip_polygon(&poly, &mut scratch, axis, sign, half[axis]);
                std::mem::swap(&mut poly, &mut scratch);
                if poly.is_empty() {
                    break;
                }
            }
            if poly.is_empty() {
                break;
            }
        }
        if poly.len() < 3 {
            continue;
        }
        let base_index = out.vertices.len() as u32;
        for cv in &poly {
            let uv = Vec2::new(0.5 + cv.pos.x / projector.size.x, 0.5 - cv.pos.y / projector.size.y);
            out.vertices.push(Vertex {
                pos: from_projector.transform_point3(cv.pos).to_array(),
                nrm: cv.nrm.normalize_or_zero().to_array(),
                uv: uv.to_array(),
            });
        }
        for k in 1..(poly.len() as u32 - 1) {
            out.indices
                .extend_from_slice(&[base_index, base_index + k, base_index + k + 1]);
        }
    }
    out
}

/// Sutherland–Hodgman against the plane `sign * pos[axis] <= limit`.
fn clip_polygon(input: &[ClipVertex], output: &mut Vec<ClipVertex>, axis: usize, sign: f32, limit: f32) {
    output.clear();
    if input.is_empty() {
        return;
    }
    let dist = |v: &ClipVertex| sign * v.pos[axis] - limit;
    let mut prev = input[input.len() - 1];
    let mut prev_d = dist(&prev);
    for cur in input {
        let cur_d = dist(cur);
        let cur_in = cur_d <= 0.0;
        let prev_in = prev_d <= 0.0;
        if cur_in != prev_in {
            let t = prev_d / (prev_d - cur_d);
            output.push(prev.lerp(cur, t));
        }
        if cur_in {
            output.push(*cur);
        }
        prev = *cur;
        prev_d = cur_d;
    }
}
