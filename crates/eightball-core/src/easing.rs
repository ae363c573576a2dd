use std::f32::consts::TAU;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - clamp01(t);
    1.0 - u * u * u
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Fraction of the remaining distance covered in `dt_sec` at `rate` (1/s).
/// Frame-rate independent: two half steps equal one full step.
#[inline]
pub fn damp_factor(rate: f32, dt_sec: f32) -> f32 {
    1.0 - (-rate * dt_sec.max(0.0)).exp()
}

#[inline]
pub fn damp(value: f32, target: f32, rate: f32, dt_sec: f32) -> f32 {
    value + (target - value) * damp_factor(rate, dt_sec)
}

/// Maps an angle into (-π, π] without changing its orientation.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = a - TAU * (a / TAU).round();
    if w <= -std::f32::consts::PI {
        w + TAU
    } else {
        w
    }
}

/// Local 0..1 position of `p` inside the `[start, end]` window.
#[inline]
pub fn window(p: f32, start: f32, end: f32) -> f32 {
    clamp01((p - start) / (end - start))
}
