//! Static Scene Renderer
//! Renders a constellation scene to PNG with plotters, for export and for
//! handing off to the system image viewer.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. 3D axes box centred on Earth
//! 3. Stars coloured by z, Earth as a larger blue marker at the origin
//! 4. Legend ("Stars", "Earth") in the upper-left corner

use crate::charts::{viridis, SceneCamera, SceneData};
use crate::coords::CartesianPoint;
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

const EARTH: RGBColor = RGBColor(30, 90, 255);
const TEXT: RGBColor = RGBColor(40, 40, 40);
const GRID: RGBColor = RGBColor(220, 220, 228);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size must be non-zero, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticSceneRenderer;

impl StaticSceneRenderer {
    /// plotters' 3D charts are y-up; the celestial frame is z-up.
    pub fn to_plot_coord(p: &CartesianPoint) -> (f64, f64, f64) {
        (p.x, p.z, p.y)
    }

    /// Render the scene into an RGB pixel buffer.
    pub fn render_rgb(
        scene: &SceneData,
        camera: &SceneCamera,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let e = scene.extent();
            let title = format!("{} - {}", scene.title, scene.constellation);

            let mut chart = ChartBuilder::on(&root)
                .caption(&title, ("sans-serif", 26).into_font().color(&TEXT))
                .margin(20)
                .build_cartesian_3d(-e..e, -e..e, -e..e)
                .map_err(draw_err)?;

            let (yaw, pitch) = (camera.yaw, camera.pitch);
            chart.with_projection(|mut pb| {
                pb.yaw = yaw;
                pb.pitch = pitch;
                pb.scale = 0.85;
                pb.into_matrix()
            });

            chart
                .configure_axes()
                .light_grid_style(GRID)
                .max_light_lines(3)
                .label_style(("sans-serif", 12).into_font().color(&TEXT))
                .draw()
                .map_err(draw_err)?;

            // Axis names at the positive ends
            let axis_font = ("sans-serif", 18).into_font().color(&TEXT);
            let axis_tips = [
                ("X", CartesianPoint { x: e, y: 0.0, z: 0.0 }),
                ("Y", CartesianPoint { x: 0.0, y: e, z: 0.0 }),
                ("Z", CartesianPoint { x: 0.0, y: 0.0, z: e }),
            ];
            chart
                .draw_series(axis_tips.iter().map(|(label, tip)| {
                    Text::new(label.to_string(), Self::to_plot_coord(tip), axis_font.clone())
                }))
                .map_err(draw_err)?;

            let (z_min, z_max) = scene.z_range();
            let (lr, lg, lb) = viridis(0.5, 0.0, 1.0);
            let legend_color = RGBColor(lr, lg, lb);

            chart
                .draw_series(scene.stars.iter().map(|s| {
                    let (r, g, b) = viridis(s.position.z, z_min, z_max);
                    Circle::new(
                        Self::to_plot_coord(&s.position),
                        4,
                        RGBColor(r, g, b).filled(),
                    )
                }))
                .map_err(draw_err)?
                .label("Stars")
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, legend_color.filled()));

            chart
                .draw_series(std::iter::once(Circle::new(
                    Self::to_plot_coord(&scene.earth),
                    8,
                    EARTH.filled(),
                )))
                .map_err(draw_err)?
                .label("Earth")
                .legend(|(x, y)| Circle::new((x + 8, y), 6, EARTH.filled()));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(TEXT)
                .label_font(("sans-serif", 14).into_font().color(&TEXT))
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Ok(buffer)
    }

    /// Render the scene and encode it as PNG.
    pub fn render_png(
        scene: &SceneData,
        camera: &SceneCamera,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let buffer = Self::render_rgb(scene, camera, width, height)?;
        let image = image::RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::InvalidSize { width, height })?;

        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render the scene to a PNG file.
    pub fn render_to_file(
        scene: &SceneData,
        camera: &SceneCamera,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let bytes = Self::render_png(scene, camera, width, height)?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), width, height, "Rendered scene");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Constellation;
    use std::path::PathBuf;

    fn empty_scene() -> SceneData {
        SceneData::from_constellation(&Constellation {
            name: "Empty".to_string(),
            path: PathBuf::from("empty.xml"),
            stars: Vec::new(),
        })
    }

    #[test]
    fn zero_size_is_rejected() {
        let scene = empty_scene();
        let camera = SceneCamera::default();
        assert!(matches!(
            StaticSceneRenderer::render_png(&scene, &camera, 0, 600),
            Err(RenderError::InvalidSize {
                width: 0,
                height: 600
            })
        ));
    }

    #[test]
    fn celestial_pole_maps_to_plot_up() {
        let pole = CartesianPoint {
            x: 0.0,
            y: 0.0,
            z: 5.0,
        };
        assert_eq!(StaticSceneRenderer::to_plot_coord(&pole), (0.0, 5.0, 0.0));
    }
}
