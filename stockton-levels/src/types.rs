// Copyright (C) 2019 Oscar Shrimpton
//
// This file is part of stockton-bsp.
//
// rust-bsp is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// rust-bsp is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with rust-bsp.  If not, see <http://www.gnu.org/licenses/>.

//! Various types shared by compiled level data.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

/// Contents of a brush or brush side, as stored by GoldSrc style compilers.
/// The engine stores these as negative integers, see [`Contents::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contents {
    Empty,
    Solid,
    Water,
    Slime,
    Lava,
    Sky,
    /// removed before bsping an entity
    Origin,
    Clip,
    Current0,
    Current90,
    Current180,
    Current270,
    CurrentUp,
    CurrentDown,
    Translucent,
    Ladder,
}

impl Contents {
    /// Interpret the engine's integer contents code.
    pub fn from_raw(raw: i32) -> Option<Contents> {
        use self::Contents::*;

        Some(match raw {
            -1 => Empty,
            -2 => Solid,
            -3 => Water,
            -4 => Slime,
            -5 => Lava,
            -6 => Sky,
            -7 => Origin,
            -8 => Clip,
            -9 => Current0,
            -10 => Current90,
            -11 => Current180,
            -12 => Current270,
            -13 => CurrentUp,
            -14 => CurrentDown,
            -15 => Translucent,
            -16 => Ladder,
            _ => return None,
        })
    }

    /// The engine's integer contents code.
    pub fn to_raw(self) -> i32 {
        use self::Contents::*;

        match self {
            Empty => -1,
            Solid => -2,
            Water => -3,
            Slime => -4,
            Lava => -5,
            Sky => -6,
            Origin => -7,
            Clip => -8,
            Current0 => -9,
            Current90 => -10,
            Current180 => -11,
            Current270 => -12,
            CurrentUp => -13,
            CurrentDown => -14,
            Translucent => -15,
            Ladder => -16,
        }
    }

    /// Water, slime or lava.
    pub fn is_liquid(self) -> bool {
        matches!(self, Contents::Water | Contents::Slime | Contents::Lava)
    }
}

impl TryFrom<i32> for Contents {
    type Error = LevelError;

    fn try_from(raw: i32) -> Result<Contents> {
        Contents::from_raw(raw).ok_or(LevelError::UnknownContents(raw))
    }
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Solid
    }
}

/// An error encountered while building level data.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Plane normal of length {0} is too short to define a plane")]
    BadNormal(f64),

    #[error("Plane distance {0} is not a finite number")]
    BadDistance(f64),

    #[error("Unknown contents code {0}")]
    UnknownContents(i32),
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, LevelError>;

#[test]
fn contents_raw_codes() {
    for raw in -16..=-1 {
        let contents = Contents::from_raw(raw).unwrap();
        assert_eq!(contents.to_raw(), raw);
    }

    assert_eq!(Contents::from_raw(0), None);
    assert!(matches!(
        Contents::try_from(-17),
        Err(LevelError::UnknownContents(-17))
    ));
}

#[test]
fn contents_liquids() {
    assert!(Contents::Water.is_liquid());
    assert!(Contents::Slime.is_liquid());
    assert!(Contents::Lava.is_liquid());
    assert!(!Contents::Solid.is_liquid());
    assert!(!Contents::Origin.is_liquid());
}
