pub mod camera;
pub mod constants;
pub mod controls;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod globe;
pub mod gpu;
pub mod orientation;
pub mod overlays;
pub mod scene;
pub mod theme;
pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");

pub use camera::*;
pub use constants::*;
pub use controls::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use globe::*;
pub use gpu::*;
pub use orientation::*;
pub use overlays::*;
pub use scene::*;
pub use theme::*;
