//! Error types

use stockton_levels::{LevelError, PlaneRef, TexInfoRef, TextureRef};
use thiserror::Error;

/// A brush referred to something that isn't in the level.
#[derive(Debug, Error)]
pub enum DecompileError {
    #[error("Brush {1} refers to plane {0}, which doesn't exist")]
    InvalidPlane(PlaneRef, usize),

    #[error("Brush {1} refers to texture info {0}, which doesn't exist")]
    InvalidTexInfo(TexInfoRef, usize),

    #[error("Texture info refers to mip texture {0}, which doesn't exist")]
    InvalidMipTexture(TextureRef, TexInfoRef),

    #[error("Error building level data")]
    Level(#[from] LevelError),
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, DecompileError>;
