// Model exports
pub mod point;

pub use point::{Coordinate, InvalidPoint, Point, PointStatus};
