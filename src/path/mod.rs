//! Path indexing and path distance interpolation
mod interp;
mod polyline;
mod trajectory;

pub use interp::{interpolate, Interpolated, Interpolation};
pub use polyline::{PathPoint, Polyline};
pub use trajectory::Trajectory;
