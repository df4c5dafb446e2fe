mod custom_controls;
mod export_window;
mod geocoder_field;
mod help;
mod notices;
mod settings_dialog;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::drawing::{SnapshotError, SnapshotFileOperation};

/// Resource that tracks whether any modal dialog is currently open.
/// Map input handlers check this to avoid drawing while the user
/// is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block map input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    settings: Res<settings_dialog::SettingsDialogState>,
    help: Res<help::HelpWindowState>,
    notices: Res<notices::NoticeQueue>,
    export_dialog: Res<export_window::ExportDialogState>,
    config_reset: Res<ConfigResetNotification>,
    snapshot_error: Res<SnapshotError>,
    operation: Res<SnapshotFileOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = settings.is_open
        || help.is_open
        || notices.is_showing()
        || config_reset.show
        || snapshot_error.message.is_some()
        || operation.is_busy()
        || export_dialog.any_file_dialog_pending();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<export_window::ExportDialogState>()
            .init_resource::<help::HelpWindowState>()
            .init_resource::<notices::NoticeQueue>()
            .init_resource::<settings_dialog::SettingsDialogState>()
            // Side panel first so the top panel fits beside it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    custom_controls::custom_controls_ui,
                    toolbar::toolbar_ui,
                    toolbar::tips_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    export_window::export_window_ui,
                    settings_dialog::settings_dialog_ui,
                    help::help_popup_ui,
                    notices::notice_popup_ui,
                    notices::snapshot_error_dialog_ui,
                    notices::config_reset_notification_ui,
                    notices::busy_operation_modal_ui,
                )
                    .after(toolbar::toolbar_ui),
            )
            .add_systems(Update, export_window::poll_file_dialogs)
            .add_systems(Update, notices::collect_notices)
            .add_systems(Update, help::handle_help_shortcut)
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
