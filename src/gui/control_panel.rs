//! Control Panel Widget
//! Left side panel: data folder, one button per constellation, status line.

use crate::data::ConstellationDescriptor;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

const BUTTON_SIZE: [f32; 2] = [250.0, 50.0];
const BUTTON_COLOR: Color32 = Color32::from_rgb(0x6C, 0x63, 0xFF);
const BUTTON_HOVER_COLOR: Color32 = Color32::from_rgb(0x5A, 0x54, 0xE6);
const BUTTON_SPACING: f32 = 15.0;

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Error,
}

/// Left side panel listing the constellations found in the data folder.
pub struct ControlPanel {
    pub directory: PathBuf,
    pub constellations: Vec<ConstellationDescriptor>,
    pub selected: Option<usize>,
    pub status: String,
    pub status_level: StatusLevel,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            constellations: Vec::new(),
            selected: None,
            status: "Ready".to_string(),
            status_level: StatusLevel::Info,
        }
    }
}

impl ControlPanel {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    /// Replace the list after a directory scan
    pub fn update_constellations(&mut self, constellations: Vec<ConstellationDescriptor>) {
        self.constellations = constellations;
        self.selected = None;
    }

    pub fn set_status(&mut self, level: StatusLevel, status: impl Into<String>) {
        self.status_level = level;
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("✨ Constellations")
                    .size(22.0)
                    .color(Color32::from_rgb(180, 175, 255)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Folder Section =====
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill.gamma_multiply(0.8))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let folder = self
                    .directory
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.directory.display().to_string());
                ui.label(RichText::new(format!("📁 {}", folder)).size(12.0))
                    .on_hover_text(self.directory.display().to_string());

                ui.horizontal(|ui| {
                    if ui.button("📂 Choose folder…").clicked() {
                        action = ControlPanelAction::ChooseFolder;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);

        // ===== Constellation Buttons =====
        let status_height = 30.0;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - status_height).max(0.0))
            .show(ui, |ui| {
                if self.constellations.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(RichText::new("No constellations found").color(Color32::GRAY));
                    });
                    return;
                }

                ui.scope(|ui| {
                    let widgets = &mut ui.visuals_mut().widgets;
                    widgets.inactive.weak_bg_fill = BUTTON_COLOR;
                    widgets.hovered.weak_bg_fill = BUTTON_HOVER_COLOR;
                    widgets.active.weak_bg_fill = BUTTON_HOVER_COLOR;
                    widgets.inactive.rounding = 10.0.into();
                    widgets.hovered.rounding = 10.0.into();
                    widgets.active.rounding = 10.0.into();
                    ui.spacing_mut().item_spacing.y = BUTTON_SPACING;

                    for (i, constellation) in self.constellations.iter().enumerate() {
                        let selected = self.selected == Some(i);
                        ui.vertical_centered(|ui| {
                            let mut button = egui::Button::new(
                                RichText::new(&constellation.name)
                                    .size(16.0)
                                    .color(Color32::WHITE),
                            )
                            .min_size(egui::vec2(BUTTON_SIZE[0], BUTTON_SIZE[1]));
                            if selected {
                                button = button.stroke(egui::Stroke::new(2.0, Color32::WHITE));
                            }

                            let response = ui
                                .add_sized(BUTTON_SIZE, button)
                                .on_hover_text(constellation.path.display().to_string());
                            if response.clicked() {
                                action = ControlPanelAction::Open(i);
                            }
                        });
                    }
                });
            });

        // ===== Status =====
        ui.separator();
        let status_color = match self.status_level {
            StatusLevel::Info => Color32::GRAY,
            StatusLevel::Success => Color32::from_rgb(40, 167, 69),
            StatusLevel::Error => Color32::from_rgb(220, 53, 69),
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Open(usize),
    ChooseFolder,
    Reload,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> ConstellationDescriptor {
        ConstellationDescriptor {
            name: name.to_string(),
            path: PathBuf::from(format!("{}.xml", name)),
        }
    }

    #[test]
    fn new_list_clears_selection() {
        let mut panel = ControlPanel::new(PathBuf::from("systems"));
        panel.update_constellations(vec![descriptor("Lyra"), descriptor("Orion")]);
        panel.selected = Some(1);
        panel.update_constellations(vec![descriptor("Cygnus")]);
        assert_eq!(panel.selected, None);
        assert_eq!(panel.constellations.len(), 1);
    }

    #[test]
    fn status_carries_level() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.status, "Ready");
        panel.set_status(StatusLevel::Error, "Error: broken.xml");
        assert_eq!(panel.status_level, StatusLevel::Error);
        assert_eq!(panel.status, "Error: broken.xml");
    }
}
