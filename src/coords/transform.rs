//! Equatorial to Cartesian Transform
//! Spherical-to-Cartesian conversion with Earth at the origin.

use super::sexagesimal::{CoordError, Declination, RightAscension};
use serde::{Deserialize, Serialize};

/// Position in space, in the same unit as the source distance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub const ORIGIN: CartesianPoint = CartesianPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Convert right ascension, declination and distance to x, y, z.
///
/// x points at RA 0h on the celestial equator, z at the north celestial pole.
pub fn to_cartesian(ra: RightAscension, dec: Declination, distance: f64) -> CartesianPoint {
    let ra_rad = ra.degrees().to_radians();
    let dec_rad = dec.degrees().to_radians();

    CartesianPoint {
        x: distance * dec_rad.cos() * ra_rad.cos(),
        y: distance * dec_rad.cos() * ra_rad.sin(),
        z: distance * dec_rad.sin(),
    }
}

/// Parse "h m s" / "d m s" strings and convert.
pub fn equatorial_to_cartesian(
    right_ascension: &str,
    declination: &str,
    distance: f64,
) -> Result<CartesianPoint, CoordError> {
    let ra = RightAscension::parse(right_ascension)?;
    let dec = Declination::parse(declination)?;
    Ok(to_cartesian(ra, dec, distance))
}
