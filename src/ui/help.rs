use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track whether the help window is open
#[derive(Resource, Default)]
pub struct HelpWindowState {
    pub is_open: bool,
}

fn shortcut_grid(ui: &mut egui::Ui, id: &str, rows: &[(&str, &str)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            for (keys, description) in rows {
                ui.strong(*keys);
                ui.label(*description);
                ui.end_row();
            }
        });
}

/// Renders the help popup window with shortcuts and usage instructions
pub fn help_popup_ui(mut contexts: EguiContexts, mut help_state: ResMut<HelpWindowState>) -> Result {
    if !help_state.is_open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Help")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Geodrawer");
            ui.separator();

            ui.heading("Tools");
            shortcut_grid(
                ui,
                "tools_grid",
                &[
                    ("P", "Point - Click to place a marker"),
                    ("L", "Polyline - Click to add vertices"),
                    ("G", "Polygon - Click to add vertices"),
                    ("C", "Circle - Click the center, move, click again"),
                    ("Escape", "Stop drawing"),
                ],
            );

            ui.add_space(10.0);
            ui.separator();

            ui.heading("Shapes");
            shortcut_grid(
                ui,
                "shapes_grid",
                &[
                    ("Right Click", "Delete the shape under the pointer"),
                    ("Drag a handle", "Move a marker, vertex or circle center"),
                    ("Reselect tool", "Start a new polyline or polygon"),
                ],
            );

            ui.add_space(10.0);
            ui.separator();

            ui.heading("Map");
            shortcut_grid(
                ui,
                "map_grid",
                &[
                    ("Middle Mouse Drag", "Pan"),
                    ("Scroll Wheel", "Zoom in/out"),
                    ("F", "Fit the map to all shapes"),
                    ("Ctrl+E", "Export shapes"),
                    ("F1", "Toggle this help window"),
                ],
            );

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.button("Close").clicked() {
                    help_state.is_open = false;
                }
            });
        });

    // Close on Escape key
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        help_state.is_open = false;
    }

    Ok(())
}

/// Handles the F1 keyboard shortcut to toggle the help window
pub fn handle_help_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut help_state: ResMut<HelpWindowState>,
    mut contexts: EguiContexts,
) {
    // Don't toggle if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::F1) {
        help_state.is_open = !help_state.is_open;
    }
}
