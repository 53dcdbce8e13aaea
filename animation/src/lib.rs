mod interpolatable;
mod interpolation;
mod tick;
mod transition;

pub use interpolatable::*;
pub use interpolation::*;
pub use tick::*;
pub use transition::*;
