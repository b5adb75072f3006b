//! Renderer contract.
//!
//! A backend implements [`Renderer`] once; the core drives it every frame and
//! never looks behind the opaque handles it hands out. Every failure degrades
//! to a no-op or `None`, so a backend that can't load a texture format or
//! allocate a render target still renders everything else.
//!
//! ```text
//! Ui::process ─► begin ─► element walk (draw_*) ─► end
//!                            │
//!                            ├─ set_draw_mode / set_draw_transform (3D entities)
//!                            ├─ start_clip / end_clip          (replace, no stack)
//!                            └─ enable_render_target ...       (cached subtrees)
//! ```

mod painter;
mod recording;

pub use painter::Painter;
pub(crate) use painter::paint_extent;
pub use recording::{DrawCall, RecordingLog, RecordingRenderer};

use std::ops::RangeInclusive;
use std::path::Path;

use bitflags::bitflags;
use trellis_shared::{Mat4, Vec3};

use crate::element::FontDesc;
use crate::style::Colour;
use crate::tags::FormatTag;

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a backend-specific value.
            #[must_use]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the backend-specific value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

opaque_handle!(
    /// Backend texture.
    TextureHandle
);
opaque_handle!(
    /// Backend font.
    FontHandle
);
opaque_handle!(
    /// Backend off-screen render target.
    RenderTargetHandle
);

/// A successfully loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTexture {
    /// Backend handle.
    pub handle: TextureHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// How subsequent draws are composed with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// 2D on top of everything.
    #[default]
    Draw2D,
    /// 2D, depth-tested at the current draw depth.
    Draw2DDepth,
    /// 3D, transformed by the current draw transform.
    Draw3D,
}

bitflags! {
    /// Options for [`Renderer::draw_text`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFlags: u8 {
        /// Interpret the passed format tags.
        const TAGS = 1 << 0;
        /// Draw a shadow one pixel below and right of the text.
        const SHADOW = 1 << 1;
        /// Synthesise bold.
        const BOLD = 1 << 2;
        /// Synthesise italic.
        const ITALIC = 1 << 3;
    }
}

/// A drawing backend.
///
/// All coordinates are absolute screen pixels (or target-local pixels while a
/// render target is enabled). Primitives use the colour last passed to
/// [`Renderer::set_draw_colour`].
pub trait Renderer {
    /// Prepares the drawing surface for a frame.
    fn begin(&mut self);

    /// Presents the frame.
    fn end(&mut self);

    /// Reallocates surface state for a new viewport size.
    fn resize(&mut self, width: u32, height: u32);

    /// Switches the draw mode and returns the previous one.
    fn set_draw_mode(&mut self, mode: DrawMode) -> DrawMode;

    /// Sets the colour used by subsequent draws.
    fn set_draw_colour(&mut self, colour: Colour);

    /// Sets the depth used by depth-tested draws.
    fn set_draw_depth(&mut self, depth: f32);

    /// Sets the transform used by 3D draws.
    fn set_draw_transform(&mut self, transform: &Mat4);

    /// Clears the 3D draw transform.
    fn reset_draw_transform(&mut self);

    /// Clips subsequent draws. Replaces any previous clip region.
    fn start_clip(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Removes the clip region.
    fn end_clip(&mut self);

    /// Draws a filled rectangle.
    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Draws a filled triangle.
    fn draw_triangle(&mut self, p1: (i32, i32), p2: (i32, i32), p3: (i32, i32));

    /// Draws a single pixel.
    fn draw_pixel(&mut self, x: i32, y: i32);

    /// Loads a texture from disk. `None` on I/O or decode failure.
    fn load_texture(&mut self, path: &Path) -> Option<LoadedTexture>;

    /// Releases a texture.
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Draws a texture stretched over a rectangle.
    ///
    /// `uv` is `[u1, v1, u2, v2]`, the texture-space corners mapped onto the
    /// rectangle's top-left and bottom-right.
    fn draw_textured_rect(
        &mut self,
        texture: TextureHandle,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        uv: [f32; 4],
    );

    /// Loads a font. `glyphs` is an advisory range for backends that cache glyphs.
    fn load_font(&mut self, desc: &FontDesc, glyphs: RangeInclusive<u32>) -> Option<FontHandle>;

    /// Releases a font.
    fn destroy_font(&mut self, font: FontHandle);

    /// Draws text at its top-left corner.
    ///
    /// `tags` index into `text` by character; they change colour and
    /// underline only. They are ignored unless `flags` contains [`TextFlags::TAGS`].
    fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        x: i32,
        y: i32,
        flags: TextFlags,
        tags: &[FormatTag],
    );

    /// Returns the tight bounding box of `text`. Tags are never part of `text`.
    fn measure_text(&mut self, font: FontHandle, text: &str) -> (u32, u32);

    /// Creates an off-screen render target.
    fn create_render_target(&mut self, width: u32, height: u32) -> Option<RenderTargetHandle>;

    /// Releases a render target.
    fn destroy_render_target(&mut self, target: RenderTargetHandle);

    /// Redirects subsequent draws into `target`; `(x, y)` maps to its origin.
    fn enable_render_target(&mut self, target: RenderTargetHandle, x: i32, y: i32);

    /// Restores the default surface.
    fn disable_render_target(&mut self, target: RenderTargetHandle);

    /// Blits a render target's content.
    fn draw_render_target(&mut self, target: RenderTargetHandle, x: i32, y: i32, width: u32, height: u32);

    /// Maps a screen position (z = depth) into the 3D scene.
    fn screen_pos_to_world(&self, screen: Vec3) -> Vec3 {
        screen
    }

    /// Maps a 3D scene position onto the screen (z = depth).
    fn world_pos_to_screen(&self, world: Vec3) -> Vec3 {
        world
    }
}
