//! Textured rectangle.

use std::path::{Path, PathBuf};

use crate::element::{Behavior, ElementKind, ElementState, UiCx};
use crate::render::{LoadedTexture, Painter};

/// UV rectangle covering the whole texture.
const FULL_UV: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Sprite: draws its texture over its bounds, tinted by the element colour.
///
/// Without a texture nothing is drawn.
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Option<LoadedTexture>,
    path: Option<PathBuf>,
    uv: [f32; 4],
}

impl Sprite {
    /// Creates a sprite behavior with no texture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            texture: None,
            path: None,
            uv: FULL_UV,
        }
    }

    /// The loaded texture.
    #[must_use]
    pub fn texture(&self) -> Option<LoadedTexture> {
        self.texture
    }

    /// Path the current texture was loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Texture coordinates `(u1, v1, u2, v2)`.
    #[must_use]
    pub fn uv(&self) -> [f32; 4] {
        self.uv
    }

    /// Sets the texture coordinates.
    pub fn set_uv(&mut self, uv: [f32; 4]) {
        self.uv = uv;
    }

    /// Installs a loaded texture and returns the one it replaces.
    pub(crate) fn replace_texture(&mut self, texture: LoadedTexture, path: &Path) -> Option<LoadedTexture> {
        self.path = Some(path.to_path_buf());
        self.texture.replace(texture)
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Sprite {
    fn kind(&self) -> ElementKind {
        ElementKind::Sprite
    }

    fn uses_text(&self) -> bool {
        false
    }

    fn on_destroy(&mut self, _element: &mut ElementState, cx: &mut UiCx<'_>) {
        if let Some(texture) = self.texture.take() {
            cx.renderer().destroy_texture(texture.handle);
        }
    }

    fn render(&self, element: &ElementState, painter: &mut Painter<'_>) {
        if let Some(texture) = self.texture {
            painter.textured_rect(texture.handle, element.bounds(), self.uv, element.colour());
        }
    }
}
