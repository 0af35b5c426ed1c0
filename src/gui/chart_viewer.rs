//! Chart Viewer Widget
//! Central panel showing the 3D map of the selected constellation.

use crate::charts::{SceneCamera, SceneData, ScenePlotter};
use egui::{RichText, ScrollArea};

const MIN_PLOT_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 160.0;

/// Interactive view of one constellation scene.
pub struct ChartViewer {
    pub scene: Option<SceneData>,
    pub camera: SceneCamera,
    pub show_labels: bool,
    pub show_table: bool,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            scene: None,
            camera: SceneCamera::default(),
            show_labels: true,
            show_table: false,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.scene = None;
    }

    /// Show a new scene with the camera reset
    pub fn set_scene(&mut self, scene: SceneData) {
        self.scene = Some(scene);
        self.camera.reset();
    }

    /// Draw the viewer
    pub fn show(&mut self, _ctx: &egui::Context, ui: &mut egui::Ui) -> ChartViewerAction {
        let mut action = ChartViewerAction::None;

        let Some(scene) = &self.scene else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Select a constellation").size(20.0));
            });
            return action;
        };

        // Title
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&scene.title).size(18.0).strong());
            ui.label(
                RichText::new(format!(
                    "{} · {} star{}",
                    scene.constellation,
                    scene.stars.len(),
                    if scene.stars.len() == 1 { "" } else { "s" }
                ))
                .size(13.0),
            );
        });
        ui.add_space(6.0);

        // Toolbar
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_labels, "Labels");
            ui.checkbox(&mut self.show_table, "Coordinates");
            ui.separator();
            ui.label("Yaw");
            ui.add(
                egui::DragValue::new(&mut self.camera.yaw)
                    .speed(0.01)
                    .max_decimals(2),
            );
            ui.label("Pitch");
            ui.add(
                egui::DragValue::new(&mut self.camera.pitch)
                    .speed(0.01)
                    .range(-std::f64::consts::FRAC_PI_2..=std::f64::consts::FRAC_PI_2)
                    .max_decimals(2),
            );
            if ui.small_button("Reset view").clicked() {
                self.camera.reset();
            }
            ui.separator();
            if ui.button("🔭 Open in viewer").clicked() {
                action = ChartViewerAction::OpenExternal;
            }
            if ui.button("🖼 Export PNG…").clicked() {
                action = ChartViewerAction::ExportPng;
            }
            if ui.button("📄 Export JSON…").clicked() {
                action = ChartViewerAction::ExportJson;
            }
        });

        if !scene.skipped.is_empty() {
            ui.label(
                RichText::new(format!("Skipped: {}", scene.skipped.join(", ")))
                    .size(11.0)
                    .color(egui::Color32::from_rgb(220, 53, 69)),
            );
        }

        ui.add_space(6.0);

        let reserved = if self.show_table { TABLE_HEIGHT } else { 0.0 };
        let plot_height = (ui.available_height() - reserved).max(MIN_PLOT_HEIGHT);
        ScenePlotter::draw_scene(ui, scene, &mut self.camera, self.show_labels, plot_height);

        if self.show_table {
            ui.add_space(6.0);
            ScrollArea::vertical()
                .max_height(TABLE_HEIGHT)
                .show(ui, |ui| ScenePlotter::draw_star_table(ui, scene));
        }

        action
    }
}

/// Actions triggered by the chart viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewerAction {
    None,
    OpenExternal,
    ExportPng,
    ExportJson,
}
