//! Shape descriptors: static shapes, runtime extents and their checks.

mod extents;
mod fixed;
mod validation;

pub use extents::{DYNAMIC, Extents, MAX_RANK, Shape};
pub use fixed::{Axis, Dyn, Dynamic, Fixed, StaticShape};
pub use validation::{
    check_contracted_extents, check_projected_offsets,
    contracted_shape_compatible,
};
