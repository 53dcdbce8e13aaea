//! Geometry primitives for mapping detection space into screen space.

mod point;
mod rect;
mod size;
mod size_i;
mod unit_interval;

pub use point::*;
pub use rect::*;
pub use size::*;
pub use size_i::*;
pub use unit_interval::*;

pub const EPSILON: f64 = f64::EPSILON;

pub trait Contains<Other> {
    fn contains(&self, other: Other) -> bool;
}
