//! Scene Plotter Module
//! Interactive 3D star map drawn with egui_plot.
//!
//! egui_plot is two-dimensional, so stars are rotated by the camera and
//! projected orthographically: the rotated x becomes the horizontal axis and
//! the rotated z the vertical one.

use crate::charts::{viridis, SceneData};
use crate::coords::CartesianPoint;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Earth marker colour
pub const EARTH_COLOR: Color32 = Color32::from_rgb(30, 90, 255);

const AXIS_COLOR: Color32 = Color32::from_rgb(150, 150, 170);
const LABEL_COLOR: Color32 = Color32::from_rgb(220, 220, 230);
const STAR_RADIUS: f32 = 4.0;
const EARTH_RADIUS: f32 = 8.0;
/// Radians of rotation per dragged point
const DRAG_SPEED: f64 = 0.01;

/// Orientation of the 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCamera {
    /// Turn around the celestial pole (z)
    pub yaw: f64,
    /// Tilt towards or away from the pole
    pub pitch: f64,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            yaw: -0.6,
            pitch: 0.35,
        }
    }
}

impl SceneCamera {
    pub fn rotation(&self) -> Matrix3<f64> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let rot_z = Matrix3::new(
            cy, -sy, 0.0,
            sy, cy, 0.0,
            0.0, 0.0, 1.0,
        );
        let rot_x = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cp, -sp,
            0.0, sp, cp,
        );
        rot_x * rot_z
    }

    /// Screen position and depth of a point. Larger depth is further away.
    pub fn project(&self, p: &CartesianPoint) -> ([f64; 2], f64) {
        let v = self.rotation() * Vector3::new(p.x, p.y, p.z);
        ([v.x, v.z], v.y)
    }

    /// Apply a mouse drag in screen points.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw += dx as f64 * DRAG_SPEED;
        self.pitch = (self.pitch + dy as f64 * DRAG_SPEED).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Draws constellation scenes.
pub struct ScenePlotter;

impl ScenePlotter {
    /// Colour for a star at height `z` given the scene's z range.
    pub fn star_color(z: f64, z_range: (f64, f64)) -> Color32 {
        let (r, g, b) = viridis(z, z_range.0, z_range.1);
        Color32::from_rgb(r, g, b)
    }

    /// Draw the rotatable 3D view. Dragging inside the plot turns the camera.
    pub fn draw_scene(
        ui: &mut egui::Ui,
        scene: &SceneData,
        camera: &mut SceneCamera,
        show_labels: bool,
        height: f32,
    ) {
        let extent = scene.extent();
        let z_range = scene.z_range();
        let cam = *camera;

        let mut projected: Vec<(String, [f64; 2], f64, Color32)> = scene
            .stars
            .iter()
            .map(|s| {
                let (xy, depth) = cam.project(&s.position);
                (
                    s.name.clone(),
                    xy,
                    depth,
                    Self::star_color(s.position.z, z_range),
                )
            })
            .collect();
        // Far stars first so near ones are painted on top
        projected.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let hover_targets: Vec<(String, [f64; 2])> =
            projected.iter().map(|(n, xy, _, _)| (n.clone(), *xy)).collect();
        let hover_radius = extent * 0.05;

        let response = Plot::new(format!("scene_{}", scene.constellation))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-extent)
            .include_x(extent)
            .include_y(-extent)
            .include_y(extent)
            .legend(Legend::default())
            .label_formatter(move |_name, value| {
                hover_targets
                    .iter()
                    .map(|(n, xy)| (n, (xy[0] - value.x).hypot(xy[1] - value.y)))
                    .filter(|(_, d)| *d <= hover_radius)
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(n, _)| n.clone())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                // Axes through Earth
                let axes = [
                    ("X", CartesianPoint { x: extent, y: 0.0, z: 0.0 }),
                    ("Y", CartesianPoint { x: 0.0, y: extent, z: 0.0 }),
                    ("Z", CartesianPoint { x: 0.0, y: 0.0, z: extent }),
                ];
                for (label, tip) in axes {
                    let tail = CartesianPoint {
                        x: -tip.x,
                        y: -tip.y,
                        z: -tip.z,
                    };
                    let (a, _) = cam.project(&tail);
                    let (b, _) = cam.project(&tip);
                    plot_ui.line(
                        Line::new(PlotPoints::new(vec![a, b]))
                            .color(AXIS_COLOR)
                            .width(1.0),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(b[0], b[1]),
                        RichText::new(label).strong().color(AXIS_COLOR),
                    ));
                }

                for (name, xy, _, color) in &projected {
                    plot_ui.points(
                        Points::new(vec![*xy])
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(STAR_RADIUS)
                            .color(*color)
                            .name("Stars"),
                    );
                    if show_labels {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(xy[0], xy[1] + extent * 0.04),
                                RichText::new(name).size(11.0).color(LABEL_COLOR),
                            )
                            .anchor(egui::Align2::CENTER_BOTTOM),
                        );
                    }
                }

                let (earth, _) = cam.project(&scene.earth);
                plot_ui.points(
                    Points::new(vec![earth])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(EARTH_RADIUS)
                        .color(EARTH_COLOR)
                        .name("Earth"),
                );
            });

        if response.response.dragged() {
            let delta = response.response.drag_delta();
            camera.drag(delta.x, delta.y);
        }
    }

    /// Table of star names and Cartesian coordinates.
    pub fn draw_star_table(ui: &mut egui::Ui, scene: &SceneData) {
        let z_range = scene.z_range();

        egui::Grid::new(format!("stars_{}", scene.constellation))
            .striped(true)
            .spacing([18.0, 4.0])
            .show(ui, |ui| {
                for header in ["Star", "X", "Y", "Z", "Distance"] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for star in &scene.stars {
                    let p = star.position;
                    ui.label(
                        RichText::new(&star.name).color(Self::star_color(p.z, z_range)),
                    );
                    ui.label(format!("{:.3}", p.x));
                    ui.label(format!("{:.3}", p.y));
                    ui.label(format!("{:.3}", p.z));
                    ui.label(format!("{:.3}", p.norm()));
                    ui.end_row();
                }

                ui.label(RichText::new("Earth").color(EARTH_COLOR));
                for _ in 0..4 {
                    ui.label("0.000");
                }
                ui.end_row();
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn origin_projects_to_origin() {
        let camera = SceneCamera {
            yaw: 1.3,
            pitch: -0.4,
        };
        let (xy, depth) = camera.project(&CartesianPoint::ORIGIN);
        assert_eq!(xy, [0.0, 0.0]);
        assert_eq!(depth, 0.0);
    }

    #[test]
    fn unrotated_camera_looks_along_y() {
        let camera = SceneCamera {
            yaw: 0.0,
            pitch: 0.0,
        };
        let (xy, depth) = camera.project(&CartesianPoint {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        });
        assert!(close(xy[0], 1.0) && close(xy[1], 3.0) && close(depth, 2.0));
    }

    #[test]
    fn rotation_keeps_lengths() {
        let camera = SceneCamera::default();
        let p = CartesianPoint {
            x: 3.0,
            y: -4.0,
            z: 12.0,
        };
        let (xy, depth) = camera.project(&p);
        let len = (xy[0] * xy[0] + xy[1] * xy[1] + depth * depth).sqrt();
        assert!(close(len, 13.0));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = SceneCamera::default();
        camera.drag(0.0, 10_000.0);
        assert!(close(camera.pitch, FRAC_PI_2));
        camera.drag(0.0, -20_000.0);
        assert!(close(camera.pitch, -FRAC_PI_2));
        camera.reset();
        assert_eq!(camera, SceneCamera::default());
    }
}
