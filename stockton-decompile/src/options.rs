//! Settings for a decompilation

use serde::{Deserialize, Serialize};

/// Options that change which brushes and textures end up in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompilerOptions {
    /// Keep water, slime and lava brushes
    pub include_liquids: bool,

    /// Give untextured sides the `NULL` texture instead of the brush's best texture
    pub apply_null_to_generated_faces: bool,
}

impl Default for DecompilerOptions {
    fn default() -> Self {
        DecompilerOptions {
            include_liquids: true,
            apply_null_to_generated_faces: false,
        }
    }
}
