use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::drawing::{MapController, Notice, SnapshotError, SnapshotFileOperation};
use crate::theme;

/// Notices raised by the tools, shown one at a time
#[derive(Resource, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) {
        // Consecutive duplicates collapse into one popup
        if self.pending.back() != Some(&notice) {
            self.pending.push_back(notice);
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.pending.front()
    }

    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }

    pub fn is_showing(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Move notices out of the controller into the popup queue
pub fn collect_notices(mut controller: ResMut<MapController>, mut queue: ResMut<NoticeQueue>) {
    if controller.notices().is_empty() {
        return;
    }
    for notice in controller.take_notices() {
        queue.push(notice);
    }
}

pub fn notice_popup_ui(mut contexts: EguiContexts, mut queue: ResMut<NoticeQueue>) -> Result {
    let Some(notice) = queue.current().cloned() else {
        return Ok(());
    };

    let mut dismissed = false;
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(theme::ui::NOTICE_TEXT, &notice.message);
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        queue.dismiss();
    }

    Ok(())
}

/// Export/import failures
pub fn snapshot_error_dialog_ui(
    mut contexts: EguiContexts,
    mut snapshot_error: ResMut<SnapshotError>,
) -> Result {
    let Some(message) = snapshot_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Export Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, &message);
            });
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                snapshot_error.message = None;
            }
        });

    Ok(())
}

/// Shown once at startup when the config file could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The configuration could not be loaded and was reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).color(theme::ui::HINT_TEXT).small());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

/// Blocks input while a snapshot file is being written or read
pub fn busy_operation_modal_ui(
    mut contexts: EguiContexts,
    operation: Res<SnapshotFileOperation>,
) -> Result {
    let Some(description) = &operation.description else {
        return Ok(());
    };

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });

    Ok(())
}
