use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::drawing::{LastExport, LoadSnapshotRequest, SaveSnapshotRequest};
use crate::paths;
use crate::theme;

const DEFAULT_EXPORT_NAME: &str = "shapes.json";

/// File dialogs opened from the toolbar and the export window
#[derive(Resource, Default)]
pub struct ExportDialogState {
    /// The toolbar asked for an import file picker
    pub request_import: bool,
    /// Pending async save dialog
    pub pending_save: Option<Task<Option<PathBuf>>>,
    /// Pending async open dialog
    pub pending_import: Option<Task<Option<PathBuf>>>,
    /// Short feedback shown in the export window ("Copied", ...)
    pub status: Option<String>,
}

impl ExportDialogState {
    pub fn any_file_dialog_pending(&self) -> bool {
        self.pending_save.is_some() || self.pending_import.is_some()
    }
}

/// Folder the file dialogs start in: next to the last snapshot file, else the exports folder
fn dialog_directory(last_export_path: Option<&Path>) -> PathBuf {
    last_export_path
        .and_then(|p| p.parent())
        .filter(|p| p.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::exports_dir)
}

fn spawn_save_dialog(directory: PathBuf) -> Task<Option<PathBuf>> {
    AsyncComputeTaskPool::get().spawn(async move {
        rfd::AsyncFileDialog::new()
            .set_title("Save Shapes")
            .add_filter("JSON", &["json"])
            .set_directory(directory)
            .set_file_name(DEFAULT_EXPORT_NAME)
            .save_file()
            .await
            .map(|h| h.path().to_path_buf())
    })
}

fn spawn_import_dialog(directory: PathBuf) -> Task<Option<PathBuf>> {
    AsyncComputeTaskPool::get().spawn(async move {
        rfd::AsyncFileDialog::new()
            .set_title("Import Shapes")
            .add_filter("JSON", &["json"])
            .set_directory(directory)
            .pick_file()
            .await
            .map(|h| h.path().to_path_buf())
    })
}

/// Shows the latest export with copy, save and open-folder actions
pub fn export_window_ui(
    mut contexts: EguiContexts,
    mut last_export: ResMut<LastExport>,
    mut dialog: ResMut<ExportDialogState>,
    config: Res<AppConfig>,
    mut load_events: MessageWriter<LoadSnapshotRequest>,
) -> Result {
    if !last_export.show {
        return Ok(());
    }
    let Some(json) = last_export.json.clone() else {
        last_export.show = false;
        return Ok(());
    };

    let mut should_close = false;
    let mut should_save = false;

    egui::Window::new("Exported Shapes")
        .collapsible(false)
        .resizable(true)
        .default_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical()
                .max_height(360.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut json.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    ui.ctx().copy_text(json.clone());
                    dialog.status = Some("Copied to clipboard".to_string());
                }
                if ui
                    .add_enabled(dialog.pending_save.is_none(), egui::Button::new("Save As..."))
                    .clicked()
                {
                    should_save = true;
                }
                if ui.button("Open exports folder").clicked() {
                    let folder = paths::exports_dir();
                    if let Err(e) = open::that(&folder) {
                        warn!("Failed to open {:?}: {}", folder, e);
                        dialog.status = Some(format!("Could not open folder: {}", e));
                    }
                }
                if ui.button("Close").clicked() {
                    should_close = true;
                }
            });

            if let Some(status) = &dialog.status {
                ui.label(egui::RichText::new(status).color(theme::ui::HINT_TEXT).small());
            }

            if !config.data.recent_exports.is_empty() {
                ui.add_space(8.0);
                ui.collapsing("Recent files", |ui| {
                    for path in &config.data.recent_exports {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.to_string_lossy().to_string());
                        if ui
                            .button(name)
                            .on_hover_text(format!("Import {}", path.to_string_lossy()))
                            .clicked()
                        {
                            load_events.write(LoadSnapshotRequest { path: path.clone() });
                            should_close = true;
                        }
                    }
                });
            }
        });

    if should_save && dialog.pending_save.is_none() {
        let directory = dialog_directory(config.data.last_export_path.as_deref());
        dialog.pending_save = Some(spawn_save_dialog(directory));
    }

    if should_close {
        last_export.show = false;
        dialog.status = None;
    }

    Ok(())
}

/// Opens requested file pickers and forwards the chosen paths
pub fn poll_file_dialogs(
    mut dialog: ResMut<ExportDialogState>,
    config: Res<AppConfig>,
    mut save_events: MessageWriter<SaveSnapshotRequest>,
    mut load_events: MessageWriter<LoadSnapshotRequest>,
) {
    if dialog.request_import {
        dialog.request_import = false;
        if dialog.pending_import.is_none() {
            let directory = dialog_directory(config.data.last_export_path.as_deref());
            dialog.pending_import = Some(spawn_import_dialog(directory));
        }
    }

    if let Some(ref mut task) = dialog.pending_save
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        dialog.pending_save = None;
        if let Some(path) = result {
            dialog.status = Some(format!("Saving to {}", path.to_string_lossy()));
            save_events.write(SaveSnapshotRequest { path });
        }
    }

    if let Some(ref mut task) = dialog.pending_import
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        dialog.pending_import = None;
        if let Some(path) = result {
            load_events.write(LoadSnapshotRequest { path });
        }
    }
}
