use bevy::prelude::*;
use bevy_egui::egui;

use crate::drawing::{GeocodeAction, GeocodeRequest, GeocoderState};
use crate::theme;

/// Search field: an address or `lat, lng`, then center the map on it or draw there
pub fn geocoder_field(
    ui: &mut egui::Ui,
    state: &mut GeocoderState,
    events: &mut MessageWriter<GeocodeRequest>,
) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Location:").color(theme::ui::LABEL_TEXT));

        let response = ui.add(
            egui::TextEdit::singleline(&mut state.query)
                .desired_width(280.0)
                .hint_text("Address or lat, lng"),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let mut action = None;
        if submitted {
            action = Some(GeocodeAction::Center);
        }
        if ui
            .add_enabled(!state.is_searching, egui::Button::new("Go"))
            .on_hover_text("Center the map on this location")
            .clicked()
        {
            action = Some(GeocodeAction::Center);
        }
        if ui
            .add_enabled(!state.is_searching, egui::Button::new("Draw here"))
            .on_hover_text("Use this location as a click of the drawing tool")
            .clicked()
        {
            action = Some(GeocodeAction::Draw);
        }

        if let Some(action) = action
            && !state.query.trim().is_empty()
        {
            events.write(GeocodeRequest {
                query: state.query.clone(),
                action,
            });
        }

        if state.is_searching {
            ui.spinner();
        } else if let Some(error) = &state.error {
            ui.colored_label(theme::ui::ERROR_TEXT, error);
        } else if let Some(found) = &state.last_found {
            ui.label(egui::RichText::new(found).color(theme::ui::HINT_TEXT).small());
        }
    });
}
