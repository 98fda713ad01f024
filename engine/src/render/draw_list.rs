//! Per-frame Draw List
//!
//! The simulation pushes one [`Transform`] per visible tile, solid and player
//! each frame. The list is rebuilt from scratch every frame; nothing persists
//! between frames. A host renderer uploads [`DrawList::as_bytes`] straight into
//! an instance buffer.

use glam::{IVec2, Vec2};

use super::camera::Camera2D;
use super::sprites::{SpriteId, get_sprite};

/// Mirror the sprite horizontally.
pub const RENDER_OPTION_FLIP_X: u32 = 1 << 0;
/// Mirror the sprite vertically.
pub const RENDER_OPTION_FLIP_Y: u32 = 1 << 1;

/// One instanced quad.
///
/// Layout (40 bytes):
/// - pos:           vec2<f32> world top-left
/// - size:          vec2<f32> world size
/// - atlas_offset:  vec2<i32> first frame in the atlas
/// - sprite_size:   vec2<i32> frame size in the atlas
/// - animation_idx: u32 frame index (advances by `sprite_size.x` in the atlas)
/// - render_options: u32 `RENDER_OPTION_*` bits
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Transform {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub atlas_offset: [i32; 2],
    pub sprite_size: [i32; 2],
    pub animation_idx: u32,
    pub render_options: u32,
}

const _: () = {
    assert!(
        std::mem::size_of::<Transform>() == 40,
        "Transform must be exactly 40 bytes for the instance buffer"
    );
};

/// Optional per-call parameters for [`DrawList::draw_sprite`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawOptions {
    /// Override the on-screen size (defaults to the sprite's own size)
    pub size: Option<Vec2>,
    pub animation_idx: u32,
    pub render_options: u32,
}

/// Draw calls for one frame plus the camera they are viewed through.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub camera: Camera2D,
    transforms: Vec<Transform>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's calls.
    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    /// Untextured quad (white texel stretched over `size`).
    pub fn draw_quad(&mut self, pos: Vec2, size: Vec2) {
        self.draw_sprite(
            SpriteId::White,
            pos,
            DrawOptions {
                size: Some(size),
                ..Default::default()
            },
        );
    }

    /// Named sprite with its top-left at `pos`.
    pub fn draw_sprite(&mut self, id: SpriteId, pos: Vec2, options: DrawOptions) {
        let sprite = get_sprite(id);
        let frame = if sprite.frame_count > 0 {
            options.animation_idx % sprite.frame_count
        } else {
            0
        };
        self.push(
            pos,
            options.size.unwrap_or(sprite.size.as_vec2()),
            sprite.atlas_offset,
            sprite.size,
            frame,
            options.render_options,
        );
    }

    /// Raw atlas rectangle (autotiled terrain).
    pub fn draw_atlas(&mut self, atlas_offset: IVec2, sprite_size: IVec2, pos: Vec2) {
        self.push(pos, sprite_size.as_vec2(), atlas_offset, sprite_size, 0, 0);
    }

    fn push(
        &mut self,
        pos: Vec2,
        size: Vec2,
        atlas_offset: IVec2,
        sprite_size: IVec2,
        animation_idx: u32,
        render_options: u32,
    ) {
        self.transforms.push(Transform {
            pos: pos.to_array(),
            size: size.to_array(),
            atlas_offset: atlas_offset.to_array(),
            sprite_size: sprite_size.to_array(),
            animation_idx,
            render_options,
        });
    }

    #[inline]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Instance buffer bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }
}
