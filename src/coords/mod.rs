//! Coords module - Equatorial to Cartesian conversion

mod sexagesimal;
mod transform;

pub use sexagesimal::{CoordError, Declination, RightAscension, Sexagesimal};
pub use transform::{equatorial_to_cartesian, to_cartesian, CartesianPoint};
