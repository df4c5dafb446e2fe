//! Click handling shared by the polyline and polygon tools.
//!
//! A path tool is `Idle` while `next_shape` is set and `Drawing` otherwise. The
//! shape being drawn is held by id, so deletions never leave it pointing at the
//! wrong item.

use bevy::prelude::*;

use crate::error::GeodrawerError;
use crate::geo::LatLng;
use crate::map::{MapSurface, ShapeId};

use super::snapshot::ToolSnapshot;
use super::tool::{ClickOutcome, DrawingTool, ToolState};

#[derive(Debug, Default)]
pub(super) struct PathDrawing {
    pub active_shape: Option<ShapeId>,
}

impl PathDrawing {
    pub fn click(
        &mut self,
        state: &mut ToolState,
        surface: &mut MapSurface,
        at: LatLng,
        start_shape: fn(&mut MapSurface, LatLng) -> ShapeId,
    ) -> ClickOutcome {
        if !state.next_shape() {
            if let Some(active) = self.active_shape.filter(|id| state.owns(*id)) {
                surface.push_vertex(active, at);
                return ClickOutcome::Extended(active);
            }
            // The shape being drawn is gone; start over
            state.set_next_shape(true);
        }

        if state.is_full() {
            info!(
                "geodrawer: maximum number of {} reached",
                state.tool_name().items_noun()
            );
            return ClickOutcome::Rejected;
        }

        let shape = start_shape(surface, at);
        state.add_item(shape);
        self.active_shape = Some(shape);
        state.set_next_shape(false);
        ClickOutcome::Created(shape)
    }

    pub fn delete(&mut self, state: &mut ToolState, surface: &mut MapSurface, id: ShapeId) -> bool {
        if state.remove_item(id).is_none() {
            return false;
        }
        surface.remove(id);
        if self.active_shape == Some(id) {
            self.active_shape = None;
        }
        state.set_next_shape(true);
        true
    }

    pub fn reset(&mut self, state: &mut ToolState) {
        self.active_shape = None;
        state.set_next_shape(true);
    }

    pub fn export(state: &ToolState, surface: &MapSurface) -> ToolSnapshot {
        ToolSnapshot::Paths(
            state
                .items()
                .iter()
                .filter_map(|id| surface.path(*id).map(<[LatLng]>::to_vec))
                .collect(),
        )
    }

    /// Paths to replay on import, or a mismatch error for another shape kind
    pub fn import_paths<'a>(
        state: &ToolState,
        data: &'a ToolSnapshot,
    ) -> Result<&'a [Vec<LatLng>], GeodrawerError> {
        match data {
            ToolSnapshot::Paths(paths) => Ok(paths),
            other if other.is_empty() => Ok(&[]),
            _ => Err(GeodrawerError::SnapshotMismatch {
                tool: state.tool_name(),
            }),
        }
    }
}

/// Replay the clicks that draw `paths`, starting a fresh shape for each one.
/// Returns how many paths could not be started.
pub(super) fn replay_paths(
    tool: &mut dyn DrawingTool,
    surface: &mut MapSurface,
    paths: &[Vec<LatLng>],
) -> usize {
    let mut rejected = 0;
    for path in paths {
        tool.prepare_tool();
        for (i, point) in path.iter().enumerate() {
            let outcome = tool.click_handler(surface, *point);
            if i == 0 && outcome == ClickOutcome::Rejected {
                rejected += 1;
            }
        }
    }
    rejected
}
