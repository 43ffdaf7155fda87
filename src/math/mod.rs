mod color;
mod transform;

pub use color::{hsv_to_rgb, parse_rgba};
pub use transform::Transform3D;
