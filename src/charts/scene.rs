//! Plot-ready scene built from a loaded constellation.

use crate::coords::CartesianPoint;
use crate::data::Constellation;
use serde::Serialize;

pub const SCENE_TITLE: &str = "3D Map of the Constellation and Earth";

/// A star with its transformed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedStar {
    pub name: String,
    pub position: CartesianPoint,
}

/// Everything needed to draw one constellation: its stars and Earth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneData {
    pub title: String,
    pub constellation: String,
    pub earth: CartesianPoint,
    pub stars: Vec<PlottedStar>,
    /// Stars whose coordinates could not be transformed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl SceneData {
    /// Transform every star of `constellation`.
    ///
    /// Stars with malformed angles are logged and left out.
    pub fn from_constellation(constellation: &Constellation) -> Self {
        let mut stars = Vec::with_capacity(constellation.stars.len());
        let mut skipped = Vec::new();

        for star in &constellation.stars {
            match star.position() {
                Ok(position) => {
                    tracing::debug!(
                        star = %star.name,
                        x = position.x,
                        y = position.y,
                        z = position.z,
                        "Transformed star"
                    );
                    stars.push(PlottedStar {
                        name: star.name.clone(),
                        position,
                    });
                }
                Err(e) => {
                    tracing::warn!(star = %star.name, error = %e, "Skipping star");
                    skipped.push(star.name.clone());
                }
            }
        }

        Self {
            title: SCENE_TITLE.to_string(),
            constellation: constellation.name.clone(),
            earth: CartesianPoint::ORIGIN,
            stars,
            skipped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Smallest and largest z of the stars, for colouring.
    pub fn z_range(&self) -> (f64, f64) {
        self.stars
            .iter()
            .map(|s| s.position.z)
            .fold(None, |acc: Option<(f64, f64)>, z| match acc {
                Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
                None => Some((z, z)),
            })
            .unwrap_or((0.0, 0.0))
    }

    /// Half-width of a cube centred on Earth that holds every star.
    ///
    /// Never zero, so an all-at-origin scene still gets usable axes.
    pub fn extent(&self) -> f64 {
        let max = self
            .stars
            .iter()
            .flat_map(|s| s.position.to_array())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
