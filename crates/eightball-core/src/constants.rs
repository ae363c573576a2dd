// Shared tuning constants for the 8-ball surface.

// Transition timing
pub const FULL_TRANSITION_MS: f64 = 3500.0;
pub const REDUCED_TRANSITION_MS: f64 = 150.0;
pub const MIN_TRANSITION_MS: f64 = 1.0;
// Progress at which the host cue fires (flight exit, before the face swap)
pub const REVEAL_CUE_PROGRESS: f32 = 2980.0 / 3500.0;

// Full-motion phase boundaries (fractions of progress)
pub const ANTICIPATION_END: f32 = 0.08;
pub const FLIGHT_END: f32 = 0.82;

// Full-motion shape
pub const CROUCH_DEPTH: f32 = 0.12; // downward offset at the bottom of the crouch
pub const CROUCH_SQUASH: f32 = 0.16; // vertical squash at the bottom of the crouch
pub const CROUCH_TILT: f32 = 0.18; // backward lean while crouching (radians)
pub const JUMP_HEIGHT: f32 = 0.55;
pub const FLIGHT_STRETCH: f32 = 0.10;
pub const WOBBLE_AMPLITUDE: f32 = 0.14;
pub const WOBBLE_CYCLES: f32 = 2.0;
pub const SPIN_TURNS: [f32; 3] = [2.0, 3.0, 1.0]; // whole turns about x, y, z
pub const SETTLE_BOUNCE: f32 = 0.09;
pub const SETTLE_SQUASH: f32 = 0.08;
pub const SETTLE_TILT: f32 = 0.06;
pub const SETTLE_DECAY: f32 = 4.5;
pub const SETTLE_HALF_CYCLES: f32 = 3.0; // integer so the bounce ends at rest

// Reduced-motion pulse
pub const REDUCED_TILT: f32 = 0.12;
pub const REDUCED_SQUASH: f32 = 0.06;

// Idle motion
pub const IDLE_BOB: f32 = 0.04;
pub const IDLE_SWAY: [f32; 3] = [0.08, 0.12, 0.04]; // radians about x, y, z
pub const IDLE_FREQ: [f32; 4] = [0.7, 0.5, 0.33, 1.1]; // rad/s for x, y, z, bob
pub const POINTER_TILT: [f32; 2] = [0.45, 0.35]; // yaw per pointer x, pitch per pointer y

// Damping rates (1/s)
pub const POINTER_DAMPING: f32 = 6.0;
pub const REVEAL_DAMPING: f32 = 5.0;
pub const POSE_DAMPING_IDLE: f32 = 10.0;
pub const POSE_DAMPING_TRANSITION: f32 = 14.0;
pub const MAX_FRAME_DELTA_SEC: f32 = 0.05;

// Face visibility
pub const VISIBILITY_EPSILON: f32 = 0.015;

// Render resolution
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 1.8;

// Texture buffers
pub const GLYPH_TEXTURE_PX: u32 = 512;
pub const PROMPT_TEXTURE_PX: u32 = 1024;
pub const MAX_PROMPT_LINES: usize = 4;
pub const PROMPT_PLACEHOLDER: &str = "listening...";
pub const ELLIPSIS: &str = "...";

// Sphere tessellation
pub const SPHERE_SEGMENTS: u32 = 64;
pub const SPHERE_RINGS: u32 = 48;

// Camera
pub const CAMERA_Z: f32 = 5.6;
pub const CAMERA_FOVY_DEG: f32 = 35.0;
