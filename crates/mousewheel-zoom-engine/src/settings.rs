use serde::{Deserialize, Serialize};

use crate::keys::ModifierKey;

/// User-tunable zoom behaviour.
///
/// Every field has a default, so a partial settings table only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub modifier_key: ModifierKey,
    /// Pixels added or removed per scroll notch.
    pub step_size: u32,
    /// Width given to an image that has no size yet.
    pub initial_size: u32,
    /// Also resize canvas nodes under the pointer.
    pub resize_in_canvas: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            modifier_key: ModifierKey::AltLeft,
            step_size: 25,
            initial_size: 500,
            resize_in_canvas: false,
        }
    }
}
