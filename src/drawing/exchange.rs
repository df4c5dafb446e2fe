//! Export, import, clear and fit: the map-wide operations behind the built-in controls.
//!
//! Snapshot files are written and read on the IO task pool; finished tasks are
//! polled every frame.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use crate::config::{ExportTarget, UpdateLastExportPathRequest};
use crate::constants::EXPORTED_EVENT;
use crate::dispatcher::EventDispatcher;
use crate::map::{FitBoundsRequest, MapSurface};

use super::controller::MapController;
use super::snapshot::MapSnapshot;

/// Export every tool's shapes
#[derive(Message)]
pub struct ExportMapRequest;

/// Remove every tool's shapes
#[derive(Message)]
pub struct ClearMapRequest;

/// Zoom the map so that every shape is visible
#[derive(Message)]
pub struct FitShapesRequest;

/// Replay a snapshot into the tools
#[derive(Message)]
pub struct ImportSnapshotRequest {
    pub snapshot: MapSnapshot,
    /// Clear the map before replaying
    pub replace: bool,
}

/// Write the current export to a file
#[derive(Message)]
pub struct SaveSnapshotRequest {
    pub path: PathBuf,
}

/// Read a snapshot file and import it
#[derive(Message)]
pub struct LoadSnapshotRequest {
    pub path: PathBuf,
}

/// The latest export, shown in the export window
#[derive(Resource, Default)]
pub struct LastExport {
    pub json: Option<String>,
    pub show: bool,
}

/// Snapshot file operation in progress, if any
#[derive(Resource, Default)]
pub struct SnapshotFileOperation {
    pub description: Option<String>,
}

impl SnapshotFileOperation {
    pub fn is_busy(&self) -> bool {
        self.description.is_some()
    }
}

/// Last export/import failure, shown to the user
#[derive(Resource, Default)]
pub struct SnapshotError {
    pub message: Option<String>,
}

pub struct SaveSnapshotResult {
    pub path: PathBuf,
    pub error: Option<String>,
}

pub struct LoadSnapshotResult {
    pub path: PathBuf,
    pub snapshot: Result<MapSnapshot, String>,
}

#[derive(Component)]
pub struct SaveSnapshotTask(pub Task<SaveSnapshotResult>);

#[derive(Component)]
pub struct LoadSnapshotTask(pub Task<LoadSnapshotResult>);

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("snapshot")
        .to_string()
}

pub fn export_map_system(
    mut events: MessageReader<ExportMapRequest>,
    controller: Res<MapController>,
    surface: Res<MapSurface>,
    dispatcher: Res<EventDispatcher>,
    mut last_export: ResMut<LastExport>,
    mut snapshot_error: ResMut<SnapshotError>,
) {
    for _ in events.read() {
        let snapshot = controller.export_map(&surface);

        match serde_json::to_value(&snapshot) {
            Ok(value) => dispatcher.emit(EXPORTED_EVENT, Some(&value)),
            Err(e) => error!("geodrawer: failed to encode export: {}", e),
        }

        match snapshot.to_json_pretty() {
            Ok(json) => {
                info!("geodrawer: map exported");
                last_export.json = Some(json);
                last_export.show = controller.export_target() == ExportTarget::Window;
            }
            Err(e) => {
                error!("geodrawer: failed to export map: {}", e);
                snapshot_error.message = Some(format!("Failed to export map: {}", e));
            }
        }
    }
}

pub fn clear_map_system(
    mut events: MessageReader<ClearMapRequest>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
) {
    for _ in events.read() {
        controller.clear_map(&mut surface);
    }
}

pub fn fit_shapes_system(
    mut events: MessageReader<FitShapesRequest>,
    controller: Res<MapController>,
    surface: Res<MapSurface>,
    mut fit_events: MessageWriter<FitBoundsRequest>,
) {
    for _ in events.read() {
        let bounds = controller.extend_bounds(&surface);
        if bounds.is_empty() {
            debug!("geodrawer: no shapes to fit");
            continue;
        }
        fit_events.write(FitBoundsRequest { bounds });
    }
}

pub fn import_snapshot_system(
    mut events: MessageReader<ImportSnapshotRequest>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
    mut snapshot_error: ResMut<SnapshotError>,
    mut fit_events: MessageWriter<FitShapesRequest>,
) {
    for event in events.read() {
        if event.replace {
            controller.clear_map(&mut surface);
        }
        match controller.import_map(&mut surface, &event.snapshot) {
            Ok(_) => {
                snapshot_error.message = None;
                fit_events.write(FitShapesRequest);
            }
            Err(e) => {
                error!("geodrawer: import failed: {}", e);
                snapshot_error.message = Some(format!("Import failed: {}", e));
            }
        }
    }
}

/// Starts an async write of the current export
pub fn save_snapshot_system(
    mut commands: Commands,
    mut events: MessageReader<SaveSnapshotRequest>,
    controller: Res<MapController>,
    surface: Res<MapSurface>,
    mut operation: ResMut<SnapshotFileOperation>,
) {
    for event in events.read() {
        if operation.is_busy() {
            warn!("Snapshot file operation already in progress");
            continue;
        }

        let snapshot = controller.export_map(&surface);
        let path = event.path.clone();
        operation.description = Some(format!("Saving {}...", file_label(&path)));

        let task = IoTaskPool::get().spawn(async move {
            let error = match snapshot.to_json_pretty() {
                Ok(json) => std::fs::write(&path, json)
                    .err()
                    .map(|e| format!("Failed to write file: {}", e)),
                Err(e) => Some(format!("Failed to serialize snapshot: {}", e)),
            };
            SaveSnapshotResult { path, error }
        });

        commands.spawn(SaveSnapshotTask(task));
    }
}

pub fn poll_save_snapshot_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveSnapshotTask)>,
    mut operation: ResMut<SnapshotFileOperation>,
    mut snapshot_error: ResMut<SnapshotError>,
    mut config_events: MessageWriter<UpdateLastExportPathRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            operation.description = None;

            match result.error {
                None => {
                    info!("Snapshot saved to {:?}", result.path);
                    snapshot_error.message = None;
                    config_events.write(UpdateLastExportPathRequest { path: result.path });
                }
                Some(error) => {
                    error!("{}", error);
                    snapshot_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

/// Starts an async read of a snapshot file
pub fn load_snapshot_system(
    mut commands: Commands,
    mut events: MessageReader<LoadSnapshotRequest>,
    mut operation: ResMut<SnapshotFileOperation>,
) {
    for event in events.read() {
        if operation.is_busy() {
            warn!("Snapshot file operation already in progress");
            continue;
        }

        let path = event.path.clone();
        operation.description = Some(format!("Loading {}...", file_label(&path)));

        let task = IoTaskPool::get().spawn(async move {
            let snapshot = match std::fs::read_to_string(&path) {
                Ok(json) => MapSnapshot::from_json(&json)
                    .map_err(|e| format!("Failed to parse snapshot: {}", e)),
                Err(e) => Err(format!("Failed to read file: {}", e)),
            };
            LoadSnapshotResult { path, snapshot }
        });

        commands.spawn(LoadSnapshotTask(task));
    }
}

pub fn poll_load_snapshot_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadSnapshotTask)>,
    mut operation: ResMut<SnapshotFileOperation>,
    mut snapshot_error: ResMut<SnapshotError>,
    mut import_events: MessageWriter<ImportSnapshotRequest>,
    mut config_events: MessageWriter<UpdateLastExportPathRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            operation.description = None;

            match result.snapshot {
                Ok(snapshot) => {
                    info!("Snapshot loaded from {:?}", result.path);
                    import_events.write(ImportSnapshotRequest {
                        snapshot,
                        replace: true,
                    });
                    config_events.write(UpdateLastExportPathRequest { path: result.path });
                }
                Err(error) => {
                    error!("{}", error);
                    snapshot_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
