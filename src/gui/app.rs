//! Constellation Viewer Main Application
//! Main window with the constellation list and the 3D map.

use crate::charts::{SceneData, StaticSceneRenderer, RenderError};
use crate::config::Config;
use crate::data::ConstellationLoader;
use crate::gui::{ChartViewer, ChartViewerAction, ControlPanel, ControlPanelAction, StatusLevel};
use egui::{Color32, SidePanel};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Size of exported and externally viewed images
const RENDER_WIDTH: u32 = 1400;
const RENDER_HEIGHT: u32 = 1000;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to serialize scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main application window.
pub struct ConstellationApp {
    loader: ConstellationLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    background: Option<egui::TextureHandle>,
}

impl ConstellationApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let background = match load_background(&config.background) {
            Ok(image) => Some(cc.egui_ctx.load_texture(
                "background",
                image,
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                tracing::warn!(path = %config.background.display(), error = %e, "No background image");
                None
            }
        };

        let mut app = Self {
            loader: ConstellationLoader::new(config.data_dir.clone()),
            control_panel: ControlPanel::new(config.data_dir),
            chart_viewer: ChartViewer::new(),
            background,
        };
        app.handle_reload();
        app
    }

    /// Rescan the current folder and rebuild the button list
    fn handle_reload(&mut self) {
        self.chart_viewer.clear();
        self.control_panel.directory = self.loader.directory().to_path_buf();

        match self.loader.scan() {
            Ok(report) => {
                let found = report.descriptors.len();
                let skipped = report.skipped.len();
                self.control_panel
                    .update_constellations(report.descriptors.clone());

                let mut status = format!(
                    "Loaded {} constellation{}",
                    found,
                    if found == 1 { "" } else { "s" }
                );
                if skipped > 0 {
                    status.push_str(&format!(", skipped {} file(s)", skipped));
                }
                let level = if found > 0 {
                    StatusLevel::Success
                } else {
                    StatusLevel::Info
                };
                self.control_panel.set_status(level, status);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to scan constellation directory");
                self.control_panel.update_constellations(Vec::new());
                self.control_panel
                    .set_status(StatusLevel::Error, format!("Error: {}", e));
            }
        }
    }

    /// Pick another data folder
    fn handle_choose_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_directory(self.loader.directory())
            .pick_folder()
        {
            tracing::info!(dir = %dir.display(), "Switching data folder");
            self.loader = ConstellationLoader::new(dir);
            self.handle_reload();
        }
    }

    /// Load the chosen constellation and transform its stars
    fn handle_open(&mut self, index: usize) {
        let Some(descriptor) = self.loader.descriptors().get(index).cloned() else {
            return;
        };

        match ConstellationLoader::load_constellation(&descriptor.path) {
            Ok(constellation) => {
                let scene = SceneData::from_constellation(&constellation);
                let status = if scene.skipped.is_empty() {
                    format!("Showing {}", scene.constellation)
                } else {
                    format!(
                        "Showing {} ({} star(s) skipped)",
                        scene.constellation,
                        scene.skipped.len()
                    )
                };
                self.chart_viewer.set_scene(scene);
                self.control_panel.selected = Some(index);
                self.control_panel.set_status(StatusLevel::Success, status);
            }
            Err(e) => {
                tracing::warn!(path = %descriptor.path.display(), error = %e, "Error extracting constellation data");
                self.control_panel.set_status(
                    StatusLevel::Error,
                    format!("Error: {}: {}", descriptor.name, e),
                );
            }
        }
    }

    /// Render to a temporary PNG and hand it to the system viewer
    fn handle_open_external(&mut self) {
        let Some(scene) = &self.chart_viewer.scene else {
            return;
        };

        let path = std::env::temp_dir().join(format!("{}.png", file_stem_for(&scene.constellation)));
        let result = StaticSceneRenderer::render_to_file(
            scene,
            &self.chart_viewer.camera,
            &path,
            RENDER_WIDTH,
            RENDER_HEIGHT,
        )
        .map_err(ExportError::from)
        .and_then(|()| {
            open::that(&path).map_err(|source| ExportError::Open {
                path: path.clone(),
                source,
            })
        });

        self.report_export(result.map(|()| Some(path)), "Opened");
    }

    fn handle_export_png(&mut self) {
        let Some(scene) = &self.chart_viewer.scene else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", file_stem_for(&scene.constellation)))
            .save_file()
        else {
            return; // User cancelled
        };

        let result = StaticSceneRenderer::render_to_file(
            scene,
            &self.chart_viewer.camera,
            &path,
            RENDER_WIDTH,
            RENDER_HEIGHT,
        )
        .map(|()| Some(path))
        .map_err(ExportError::from);

        self.report_export(result, "Exported");
    }

    fn handle_export_json(&mut self) {
        let Some(scene) = &self.chart_viewer.scene else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", file_stem_for(&scene.constellation)))
            .save_file()
        else {
            return;
        };

        let result = write_scene_json(scene, &path).map(|()| Some(path));
        self.report_export(result, "Exported");
    }

    fn report_export(&mut self, result: Result<Option<PathBuf>, ExportError>, verb: &str) {
        match result {
            Ok(Some(path)) => {
                tracing::info!(path = %path.display(), "{}", verb);
                self.control_panel.set_status(
                    StatusLevel::Success,
                    format!("{} {}", verb, path.display()),
                );
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.control_panel
                    .set_status(StatusLevel::Error, format!("Error: {}", e));
            }
        }
    }

    /// Paint the background image scaled to cover the whole window
    fn paint_background(&self, ctx: &egui::Context) {
        let Some(texture) = &self.background else {
            return;
        };

        let screen = ctx.screen_rect();
        let uv = cover_uv(texture.size(), screen.size());
        ctx.layer_painter(egui::LayerId::background())
            .image(texture.id(), screen, uv, Color32::WHITE);
    }
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.paint_background(ctx);

        // Translucent panels so the background shows through
        let side_frame = egui::Frame::side_top_panel(&ctx.style()).fill(Color32::from_black_alpha(170));
        let central_frame = egui::Frame::central_panel(&ctx.style()).fill(Color32::from_black_alpha(110));

        // Left panel - Constellation list
        SidePanel::left("control_panel")
            .frame(side_frame)
            .resizable(false)
            .exact_width(300.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);

                match action {
                    ControlPanelAction::Open(index) => self.handle_open(index),
                    ControlPanelAction::ChooseFolder => self.handle_choose_folder(),
                    ControlPanelAction::Reload => self.handle_reload(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - 3D map
        egui::CentralPanel::default()
            .frame(central_frame)
            .show(ctx, |ui| {
                let action = self.chart_viewer.show(ctx, ui);

                match action {
                    ChartViewerAction::OpenExternal => self.handle_open_external(),
                    ChartViewerAction::ExportPng => self.handle_export_png(),
                    ChartViewerAction::ExportJson => self.handle_export_json(),
                    ChartViewerAction::None => {}
                }
            });
    }
}

/// Decode an image file into an egui texture source.
fn load_background(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::open(path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_flat_samples().as_slice()))
}

/// UV rectangle that crops an image of `image_size` pixels to fill `screen`
/// without distortion, keeping the centre.
fn cover_uv(image_size: [usize; 2], screen: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image_size[0] == 0 || image_size[1] == 0 || screen.x <= 0.0 || screen.y <= 0.0 {
        return full;
    }

    let image_aspect = image_size[0] as f32 / image_size[1] as f32;
    let screen_aspect = screen.x / screen.y;

    if screen_aspect > image_aspect {
        // Window is wider: crop top and bottom
        let h = image_aspect / screen_aspect;
        let top = (1.0 - h) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, top), egui::pos2(1.0, top + h))
    } else {
        let w = screen_aspect / image_aspect;
        let left = (1.0 - w) / 2.0;
        egui::Rect::from_min_max(egui::pos2(left, 0.0), egui::pos2(left + w, 1.0))
    }
}

/// File name stem derived from a constellation name.
fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "constellation".to_string()
    } else {
        format!("constellation_{}", stem)
    }
}

fn write_scene_json(scene: &SceneData, path: &Path) -> Result<(), ExportError> {
    let json = scene.to_json()?;
    std::fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
