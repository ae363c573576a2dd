//! Environment lighting baked once per mount from a synthetic room.
//!
//! The room is an analytic radiance function: dim walls, a darker floor and
//! a few soft emissive panels. Two products come out of the bake:
//! - nine L2 spherical-harmonic coefficients of the cosine-convolved
//!   irradiance, for diffuse shading;
//! - a small equirectangular radiance map for glossy reflections.

use glam::Vec3;
use std::f32::consts::PI;

pub const SH_COEFFS: usize = 9;
pub const RADIANCE_WIDTH: u32 = 128;
pub const RADIANCE_HEIGHT: u32 = 64;

/// Soft rectangular-ish light panel described by a direction cone.
#[derive(Clone, Copy, Debug)]
pub struct Panel {
    pub direction: Vec3,
    pub inner_cos: f32,
    pub outer_cos: f32,
    pub radiance: Vec3,
}

#[derive(Clone, Debug)]
pub struct RoomEnvironment {
    pub ceiling: Vec3,
    pub walls: Vec3,
    pub floor: Vec3,
    pub panels: Vec<Panel>,
}

impl Default for RoomEnvironment {
    fn default() -> Self {
        let panel = |dir: Vec3, inner_deg: f32, outer_deg: f32, r: Vec3| Panel {
            direction: dir.normalize(),
            inner_cos: inner_deg.to_radians().cos(),
            outer_cos: outer_deg.to_radians().cos(),
            radiance: r,
        };
        Self {
            ceiling: Vec3::splat(0.22),
            walls: Vec3::splat(0.12),
            floor: Vec3::new(0.05, 0.05, 0.06),
            panels: vec![
                panel(Vec3::new(0.0, 1.0, 0.25), 18.0, 30.0, Vec3::splat(6.0)),
                panel(Vec3::new(-1.0, 0.35, 0.4), 10.0, 18.0, Vec3::new(3.0, 3.1, 3.4)),
                panel(Vec3::new(0.9, 0.45, -0.5), 12.0, 20.0, Vec3::new(2.6, 2.5, 2.3)),
                panel(Vec3::new(0.3, 0.25, 1.0), 6.0, 12.0, Vec3::splat(1.6)),
            ],
        }
    }
}

#[inline]
fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl RoomEnvironment {
    /// Radiance arriving from direction `dir` (unit length).
    pub fn radiance(&self, dir: Vec3) -> Vec3 {
        let up = dir.y;
        let base = if up >= 0.0 {
            self.walls.lerp(self.ceiling, smoothstep(0.2, 0.9, up))
        } else {
            self.walls.lerp(self.floor, smoothstep(-0.05, -0.4, up))
        };
        self.panels.iter().fold(base, |acc, p| {
            acc + p.radiance * smoothstep(p.outer_cos, p.inner_cos, dir.dot(p.direction))
        })
    }
}

/// Direction for an equirectangular texel center; shaders use the inverse
/// mapping `u = (atan2(z, x) + π) / 2π`, `v = acos(y) / π`.
pub fn equirect_direction(x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    let theta = (y as f32 + 0.5) / height as f32 * PI;
    let phi = (x as f32 + 0.5) / width as f32 * 2.0 * PI - PI;
    Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
}

/// Real L2 spherical-harmonic basis.
pub fn sh_basis(d: Vec3) -> [f32; SH_COEFFS] {
    [
        0.282_095,
        0.488_603 * d.y,
        0.488_603 * d.z,
        0.488_603 * d.x,
        1.092_548 * d.x * d.y,
        1.092_548 * d.y * d.z,
        0.315_392 * (3.0 * d.z * d.z - 1.0),
        1.092_548 * d.x * d.z,
        0.546_274 * (d.x * d.x - d.y * d.y),
    ]
}

// Cosine-lobe convolution weights per band.
const BAND_WEIGHTS: [f32; SH_COEFFS] = [
    PI,
    2.0 * PI / 3.0,
    2.0 * PI / 3.0,
    2.0 * PI / 3.0,
    PI / 4.0,
    PI / 4.0,
    PI / 4.0,
    PI / 4.0,
    PI / 4.0,
];

#[derive(Clone, Debug)]
pub struct EnvironmentBake {
    /// Irradiance coefficients, already convolved: E(n) = Σ c_i Y_i(n).
    pub irradiance_sh: [Vec3; SH_COEFFS],
    pub radiance_width: u32,
    pub radiance_height: u32,
    /// RGBA8, Reinhard-encoded (`c / (1 + c)`) so highlights survive 8 bits.
    pub radiance_rgba8: Vec<u8>,
}

impl EnvironmentBake {
    /// Evaluates the baked irradiance for normal `n`.
    pub fn irradiance(&self, n: Vec3) -> Vec3 {
        sh_basis(n)
            .iter()
            .zip(self.irradiance_sh.iter())
            .fold(Vec3::ZERO, |acc, (y, c)| acc + *c * *y)
    }
}

/// Integrates `radiance` over the sphere on a lat-long grid.
pub fn project_irradiance<F: Fn(Vec3) -> Vec3>(radiance: F, width: u32, height: u32) -> [Vec3; SH_COEFFS] {
    let mut coeffs = [Vec3::ZERO; SH_COEFFS];
    let d_phi = 2.0 * PI / width as f32;
    let d_theta = PI / height as f32;
    for y in 0..height {
        let theta = (y as f32 + 0.5) * d_theta;
        let d_omega = d_phi * d_theta * theta.sin();
        for x in 0..width {
            let dir = equirect_direction(x, y, width, height);
            let l = radiance(dir) * d_omega;
            for (c, b) in coeffs.iter_mut().zip(sh_basis(dir)) {
                *c += l * b;
            }
        }
    }
    for (c, w) in coeffs.iter_mut().zip(BAND_WEIGHTS) {
        *c *= w;
    }
    coeffs
}

pub fn bake_environment(room: &RoomEnvironment) -> EnvironmentBake {
    let irradiance_sh = project_irradiance(|d| room.radiance(d), 96, 48);
    let (w, h) = (RADIANCE_WIDTH, RADIANCE_HEIGHT);
    let mut radiance_rgba8 = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let c = room.radiance(equirect_direction(x, y, w, h));
            let enc = c / (Vec3::ONE + c);
            radiance_rgba8.extend_from_slice(&[
                (enc.x * 255.0).round() as u8,
                (enc.y * 255.0).round() as u8,
                (enc.z * 255.0).round() as u8,
                255,
            ]);
        }
    }
    log::debug!("environment baked: {}x{} radiance, {} SH coefficients", w, h, SH_COEFFS);
    EnvironmentBake {
        irradiance_sh,
        radiance_width: w,
        radiance_height: h,
        radiance_rgba8,
    }
}
