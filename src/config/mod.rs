mod map_options;

pub use map_options::{
    ControlSetting, CustomControl, ExportTarget, MapOptions, ToolConfig,
};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::MAX_RECENT_EXPORTS;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Map, tools and controls
    #[serde(default)]
    pub map: MapOptions,

    /// Last file a snapshot was exported to (suggested by the next save dialog)
    #[serde(default)]
    pub last_export_path: Option<PathBuf>,

    /// Recently written or read snapshot files
    #[serde(default)]
    pub recent_exports: Vec<PathBuf>,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the file a snapshot was written to or read from
#[derive(Message)]
pub struct UpdateLastExportPathRequest {
    pub path: PathBuf,
}

/// Message to store a tool's new item cap
#[derive(Message)]
pub struct UpdateToolOptionsRequest {
    pub tool: crate::drawing::ToolName,
    pub max_items_allowed: u32,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

fn parse_config(json: &str) -> Result<AppConfigData, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Move `path` to the front of the recent list, keeping it bounded
fn push_recent(recent: &mut Vec<PathBuf>, path: &PathBuf) {
    recent.retain(|p| p != path);
    recent.insert(0, path.clone());
    recent.truncate(MAX_RECENT_EXPORTS);
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update the last export path and the recent list
fn update_last_export_path_system(
    mut events: MessageReader<UpdateLastExportPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_export_path = Some(event.path.clone());
        push_recent(&mut config.data.recent_exports, &event.path);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

fn update_tool_options_system(
    mut events: MessageReader<UpdateToolOptionsRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let entry = config.data.map.tools.entry(event.tool.to_string()).or_default();
        entry.options.max_items_allowed = event.max_items_allowed;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!(
            "Set {} max items allowed to {}",
            event.tool, event.max_items_allowed
        );
    }
}

/// Loads config while the app is being built, so later plugins can read the map options
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let result = load_config();
        let mut reset_notification = ConfigResetNotification::default();
        if let Some(reason) = result.reset_reason {
            reset_notification.show = true;
            reset_notification.reason = Some(reason);
        }

        app.insert_resource(result.config)
            .insert_resource(reset_notification)
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastExportPathRequest>()
            .add_message::<UpdateToolOptionsRequest>()
            .add_systems(
                Update,
                (
                    update_last_export_path_system
                        .run_if(on_message::<UpdateLastExportPathRequest>),
                    update_tool_options_system.run_if(on_message::<UpdateToolOptionsRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.last_export_path.is_none());
        assert!(data.recent_exports.is_empty());
        assert_eq!(data.map, MapOptions::default());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let mut data = AppConfigData {
            last_export_path: Some(PathBuf::from("/path/to/shapes.json")),
            recent_exports: vec![PathBuf::from("/path/one"), PathBuf::from("/path/two")],
            ..Default::default()
        };
        data.map.zoom = 5.0;
        data.map.geocoder_map_field = false;

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.last_export_path, data.last_export_path);
        assert_eq!(parsed.recent_exports, data.recent_exports);
        assert_eq!(parsed.map, data.map);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let data = parse_config("{}").unwrap();
        assert_eq!(data.map, MapOptions::default());
    }

    #[test]
    fn test_corrupted_config_fails_to_parse() {
        assert!(parse_config("{ not json").is_err());
    }

    #[test]
    fn test_push_recent_moves_to_front_and_truncates() {
        let mut recent: Vec<PathBuf> = (0..MAX_RECENT_EXPORTS)
            .map(|i| PathBuf::from(format!("/exports/{i}.json")))
            .collect();
        let again = PathBuf::from("/exports/3.json");
        push_recent(&mut recent, &again);
        assert_eq!(recent[0], again);
        assert_eq!(recent.len(), MAX_RECENT_EXPORTS);

        push_recent(&mut recent, &PathBuf::from("/exports/new.json"));
        assert_eq!(recent.len(), MAX_RECENT_EXPORTS);
        assert_eq!(recent[0], PathBuf::from("/exports/new.json"));
    }
}
