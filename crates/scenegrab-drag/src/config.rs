use scenegrab_base::{Error, Result, Tolerance};
use serde::{Deserialize, Serialize};

use crate::plane::PlaneOrientation;

/// Controller options. `DragConfig::default()` is the zero-configuration
/// behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Test descendants of registered nodes, not only the nodes themselves.
    pub recursive: bool,
    pub plane_orientation: PlaneOrientation,
    /// End a drag when a move, leave or capture-lost event reports the
    /// primary button up, even without an explicit up event.
    pub implicit_release: bool,
    pub tolerance: Tolerance,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            plane_orientation: PlaneOrientation::CameraPosition,
            implicit_release: true,
            tolerance: Tolerance::default(),
        }
    }
}

impl DragConfig {
    pub fn validate(&self) -> Result<()> {
        let linear = self.tolerance.linear;
        if !(linear.is_finite() && linear >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "tolerance.linear must be a non-negative number, got {linear}"
            )));
        }
        Ok(())
    }
}
