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

//! Data read out of compiled levels: planes, textures, contents and entities.

extern crate nalgebra as na;

pub mod entities;
pub mod planes;
pub mod textures;
pub mod types;

pub use self::entities::Entity;
pub use self::planes::{Plane, PlaneRef, PlaneTable, PlaneType};
pub use self::textures::{MipTexture, TexInfoRef, TextureInfo, TextureRef, TextureSet};
pub use self::types::{Contents, LevelError, Result};
