//! Pointer and keyboard input routed to the map controller.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::constants::CLICK_DRAG_THRESHOLD_PX;
use crate::geo::LatLng;
use crate::map::{is_cursor_over_ui, CameraParams, HandleRef, MapSurface};
use crate::ui::DialogState;

use super::controller::{MapControl, MapController};
use super::exchange::{ExportMapRequest, FitShapesRequest};
use super::tool::ToolName;

/// Left-button press being tracked to tell clicks from handle drags
#[derive(Resource, Default)]
pub struct PointerState {
    /// Screen position of the current press
    pub press_screen: Option<Vec2>,
    /// Handle grabbed by the current press
    pub dragging: Option<HandleRef>,
    /// The press moved past the click threshold
    pub moved: bool,
    /// Map position last reported to the drawing tool
    pub last_latlng: Option<LatLng>,
}

impl PointerState {
    fn reset_press(&mut self) {
        self.press_screen = None;
        self.dragging = None;
        self.moved = false;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_map_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    dialog_state: Res<DialogState>,
    mut pointer: ResMut<PointerState>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
) {
    if dialog_state.any_modal_open {
        pointer.reset_press();
        return;
    }

    let (Some(world), Some(screen)) = (camera.cursor_world_pos(), camera.cursor_screen_pos())
    else {
        return;
    };
    let at = LatLng::from_world(world);
    let over_ui = is_cursor_over_ui(&mut contexts);

    // Sizing circles follow the pointer over the map
    if !over_ui && pointer.last_latlng != Some(at) {
        pointer.last_latlng = Some(at);
        controller.pointer_moved(&mut surface, at);
    }

    if mouse_button.just_pressed(MouseButton::Left) && !over_ui {
        pointer.press_screen = Some(screen);
        pointer.moved = false;
        pointer.dragging = surface.handle_at(world, camera.world_tolerance());
    }

    if mouse_button.pressed(MouseButton::Left)
        && let Some(press) = pointer.press_screen
    {
        if press.distance(screen) > CLICK_DRAG_THRESHOLD_PX {
            pointer.moved = true;
        }
        if pointer.moved
            && let Some(handle) = pointer.dragging
        {
            surface.move_handle(handle, at);
        }
    }

    if mouse_button.just_released(MouseButton::Left) {
        if pointer.press_screen.is_some() && !pointer.moved {
            controller.click(&mut surface, at);
        }
        pointer.reset_press();
    }

    if mouse_button.just_pressed(MouseButton::Right) && !over_ui {
        controller.secondary_click(&mut surface, world, camera.world_tolerance());
    }
}

pub fn handle_drawing_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    dialog_state: Res<DialogState>,
    mut controller: ResMut<MapController>,
    mut export_events: MessageWriter<ExportMapRequest>,
    mut fit_events: MessageWriter<FitShapesRequest>,
) {
    // Don't handle shortcuts while typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }
    if dialog_state.any_modal_open {
        return;
    }

    let tool = if keyboard.just_pressed(KeyCode::KeyP) {
        Some(ToolName::Point)
    } else if keyboard.just_pressed(KeyCode::KeyL) {
        Some(ToolName::Polyline)
    } else if keyboard.just_pressed(KeyCode::KeyG) {
        Some(ToolName::Polygon)
    } else if keyboard.just_pressed(KeyCode::KeyC) {
        Some(ToolName::Circle)
    } else {
        None
    };

    if let Some(tool) = tool {
        controller.set_drawing(tool);
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        controller.set_drawing_tool(None);
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        fit_events.write(FitShapesRequest);
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl
        && keyboard.just_pressed(KeyCode::KeyE)
        && controller.control(MapControl::ExportMap).is_enabled()
    {
        export_events.write(ExportMapRequest);
    }
}

pub fn update_cursor_icon(
    controller: Res<MapController>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    let icon = if is_cursor_over_ui(&mut contexts) || controller.drawing_tool().is_none() {
        SystemCursorIcon::Default
    } else {
        SystemCursorIcon::Crosshair
    };
    commands.entity(entity).insert(CursorIcon::System(icon));
}
