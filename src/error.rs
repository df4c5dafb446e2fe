//! Errors that abort initialization or reject malformed input.
//!
//! Reaching a tool's item cap is not an error: the click handler reports it as a
//! rejected outcome and the controller queues a notice for the user.

use crate::drawing::ToolName;

#[derive(Debug, thiserror::Error)]
pub enum GeodrawerError {
    #[error("the map engine must be loaded before geodrawer")]
    MissingMapEngine,

    #[error("the given ctrl for the {tool} tool is not a known control")]
    ControllerNotFound { tool: ToolName },

    #[error("the given {control} control is not a known control")]
    ControlNotFound { control: String },

    #[error("the given tool is not supported: {0}")]
    UnsupportedTool(String),

    #[error("snapshot data does not describe {tool} shapes")]
    SnapshotMismatch { tool: ToolName },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
