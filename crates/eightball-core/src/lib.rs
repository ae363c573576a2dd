pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod easing;
pub mod environment;
pub mod error;
pub mod frame_loop;
pub mod host;
pub mod lifecycle;
pub mod mesh;
pub mod motion;
pub mod scene;
pub mod texture;
pub mod transition;
pub mod wrap;

pub static BALL_WGSL: &str = include_str!("../shaders/ball.wgsl");

pub use animation::*;
pub use camera::Camera;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame_loop::*;
pub use host::*;
pub use lifecycle::*;
pub use motion::Pose;
pub use scene::*;
pub use texture::*;
pub use transition::*;
pub use wrap::*;
