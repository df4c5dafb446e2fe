//! Options of the drawing map: initial view, tools and built-in controls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::drawing::{ToolName, ToolOptions};
use crate::geo::LatLng;

/// How a built-in control is provided.
///
/// Stored as `"default"` for the built-in control, `null` to disable it, or the
/// id of a custom control.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ControlSetting {
    #[default]
    Default,
    Disabled,
    Custom(String),
}

impl From<Option<String>> for ControlSetting {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None => ControlSetting::Disabled,
            Some("default") => ControlSetting::Default,
            Some(id) => ControlSetting::Custom(id.to_string()),
        }
    }
}

impl From<ControlSetting> for Option<String> {
    fn from(value: ControlSetting) -> Self {
        match value {
            ControlSetting::Default => Some("default".to_string()),
            ControlSetting::Disabled => None,
            ControlSetting::Custom(id) => Some(id),
        }
    }
}

impl ControlSetting {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ControlSetting::Disabled)
    }

    pub fn custom_id(&self) -> Option<&str> {
        match self {
            ControlSetting::Custom(id) => Some(id),
            _ => None,
        }
    }
}

/// Where an export goes besides the `geodrawer-exported` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    /// Show the snapshot in the export window
    #[default]
    Window,
    /// Only emit the event
    Event,
}

/// A caller-supplied control, shown in the custom controls panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomControl {
    pub id: String,
    pub label: String,
}

/// Tool entry: optional custom controller id and options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub ctrl: Option<String>,
    pub options: ToolOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Initial map center as `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: f32,
    /// Tools keyed by kind; unknown kinds are rejected when the controller is built
    pub tools: BTreeMap<String, ToolConfig>,
    pub clear_map_ctrl: ControlSetting,
    pub export_map_ctrl: ControlSetting,
    pub tips_map_ctrl: ControlSetting,
    pub geocoder_map_field: bool,
    pub export_map_callback: ExportTarget,
    pub custom_controls: Vec<CustomControl>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tools: ToolName::ALL
                .into_iter()
                .map(|name| (name.to_string(), ToolConfig::default()))
                .collect(),
            clear_map_ctrl: ControlSetting::Default,
            export_map_ctrl: ControlSetting::Default,
            tips_map_ctrl: ControlSetting::Default,
            geocoder_map_field: true,
            export_map_callback: ExportTarget::Window,
            custom_controls: Vec::new(),
        }
    }
}

impl MapOptions {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center[0], self.center[1])
    }
}
