// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.

// You should have received a copy of the GNU General Public License along
// with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Texture projections and the textures they refer to.

use na::{Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Index of a [`TextureInfo`] in a [`TextureSet`].
pub type TexInfoRef = u32;

/// Index of a [`MipTexture`] in a [`TextureSet`].
pub type TextureRef = u32;

/// A texture from a compiled level. Only the name and size are kept, not the pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MipTexture {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl MipTexture {
    /// A texture known only by name.
    pub fn named(name: &str) -> MipTexture {
        MipTexture {
            name: name.to_owned(),
            width: 0,
            height: 0,
        }
    }
}

/// How a texture is projected onto a face.
/// `s` and `t` are (direction * scale, offset): the texture co-ordinate of a point `p` is `dot(p, s.xyz) + s.w`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub s: Vector4<f64>,
    pub t: Vector4<f64>,

    /// The texture used, if any
    pub miptex: Option<TextureRef>,

    pub flags: u32,
}

impl TextureInfo {
    /// Project `miptex` along the given texture axes with no offset.
    pub fn from_axes(miptex: TextureRef, u_axis: &Vector3<f64>, v_axis: &Vector3<f64>) -> TextureInfo {
        TextureInfo {
            s: u_axis.push(0.0),
            t: v_axis.push(0.0),
            miptex: Some(miptex),
            flags: 0,
        }
    }
}

/// All texture infos and textures of a level.
/// New entries can be added but existing ones never move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureSet {
    infos: Vec<TextureInfo>,
    textures: Vec<MipTexture>,
}

impl TextureSet {
    pub fn new(infos: Vec<TextureInfo>, textures: Vec<MipTexture>) -> TextureSet {
        TextureSet { infos, textures }
    }

    pub fn get_info(&self, idx: TexInfoRef) -> Option<&TextureInfo> {
        self.infos.get(idx as usize)
    }

    pub fn get_texture(&self, idx: TextureRef) -> Option<&MipTexture> {
        self.textures.get(idx as usize)
    }

    pub fn add_info(&mut self, info: TextureInfo) -> TexInfoRef {
        self.infos.push(info);
        (self.infos.len() - 1) as TexInfoRef
    }

    pub fn add_texture(&mut self, texture: MipTexture) -> TextureRef {
        self.textures.push(texture);
        (self.textures.len() - 1) as TextureRef
    }

    pub fn n_infos(&self) -> usize {
        self.infos.len()
    }

    pub fn n_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn iter_textures(&self) -> std::slice::Iter<'_, MipTexture> {
        self.textures.iter()
    }
}

#[test]
fn textures_append_keeps_indices() {
    let mut set = TextureSet::new(
        vec![TextureInfo::from_axes(
            0,
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, -1.0, 0.0),
        )],
        vec![MipTexture::named("BRICK")],
    );

    let tex = set.add_texture(MipTexture::named("ORIGIN"));
    let info = set.add_info(TextureInfo::from_axes(
        tex,
        &Vector3::new(0.0, 1.0, 0.0),
        &Vector3::new(0.0, 0.0, -1.0),
    ));

    assert_eq!(tex, 1);
    assert_eq!(info, 1);
    assert_eq!(set.get_texture(0).unwrap().name, "BRICK");
    assert_eq!(set.get_info(0).unwrap().miptex, Some(0));
    assert_eq!(set.get_info(1).unwrap().s, Vector4::new(0.0, 1.0, 0.0, 0.0));
    assert!(set.get_info(2).is_none());
    assert_eq!(
        set.iter_textures().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["BRICK", "ORIGIN"]
    );
}
