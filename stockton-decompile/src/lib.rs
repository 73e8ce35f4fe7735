/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Rebuilds editable brushes from the brushes of a compiled level.
//!
//! Each brush has windings built for its sides, gets bevel planes added, and is then
//! converted to a [`Solid`] made of three-point faces with editor texture axes.

#[macro_use]
extern crate bitflags;
extern crate nalgebra as na;

pub mod bevels;
pub mod brush;
pub mod convert;
pub mod decompiler;
pub mod error;
pub mod map;
pub mod options;
pub mod texture;
pub mod winding;

pub use self::brush::{brush_from_bounds, Brush, BrushSide, DecompiledBrush, InvalidBounds, SideFlags};
pub use self::decompiler::{BrushOutcome, DecompileStats, Decompiler, DiscardReason};
pub use self::error::{DecompileError, Result};
pub use self::map::{Face, MapEntity, Solid};
pub use self::options::DecompilerOptions;
pub use self::texture::TextureProperties;
pub use self::winding::Winding;
