//! Constellation data types.

use crate::coords::{equatorial_to_cartesian, CartesianPoint, CoordError};
use serde::Serialize;
use std::path::PathBuf;

/// One selectable entry in the constellation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstellationDescriptor {
    pub name: String,
    pub path: PathBuf,
}

/// Astrometric fields of a single star, as written in the descriptor file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRecord {
    pub name: String,
    /// "h m s"
    pub right_ascension: String,
    /// "d m s", sign on the degree term
    pub declination: String,
    pub distance: f64,
}

impl StarRecord {
    /// Cartesian position relative to Earth.
    pub fn position(&self) -> Result<CartesianPoint, CoordError> {
        equatorial_to_cartesian(&self.right_ascension, &self.declination, self.distance)
    }
}

/// A descriptor file opened for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    pub name: String,
    pub path: PathBuf,
    pub stars: Vec<StarRecord>,
}
