//! Headless backend that records every contract call.
//!
//! Used by tests and benchmarks. Text is measured with a fixed advance of half
//! the font size per character, and only textures registered up front with
//! [`RecordingRenderer::with_texture`] load; every other path fails.

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use trellis_shared::Mat4;

use super::{DrawMode, FontHandle, LoadedTexture, RenderTargetHandle, Renderer, TextFlags, TextureHandle};
use crate::element::FontDesc;
use crate::style::Colour;
use crate::tags::{style_runs, FormatTag, StyleRun};

/// One recorded contract call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCall {
    /// Frame start.
    Begin,
    /// Frame end.
    End,
    /// Viewport resize.
    Resize { width: u32, height: u32 },
    /// Draw mode switch.
    DrawMode(DrawMode),
    /// Draw depth change.
    Depth(f32),
    /// 3D transform set.
    Transform(Mat4),
    /// 3D transform cleared.
    ResetTransform,
    /// Clip region set.
    StartClip { x: i32, y: i32, width: u32, height: u32 },
    /// Clip region removed.
    EndClip,
    /// Filled rectangle.
    Rect { x: i32, y: i32, width: u32, height: u32, colour: Colour },
    /// Filled triangle.
    Triangle { points: [(i32, i32); 3], colour: Colour },
    /// Single pixel.
    Pixel { x: i32, y: i32, colour: Colour },
    /// Texture load attempt.
    LoadTexture { path: PathBuf, handle: Option<TextureHandle> },
    /// Texture release.
    DestroyTexture(TextureHandle),
    /// Textured rectangle.
    TexturedRect { texture: TextureHandle, x: i32, y: i32, width: u32, height: u32, uv: [f32; 4], colour: Colour },
    /// Font load attempt.
    LoadFont { name: String, size: u8, handle: Option<FontHandle> },
    /// Font release.
    DestroyFont(FontHandle),
    /// Text, with the styled runs a backend would draw it in.
    Text {
        font: FontHandle,
        text: String,
        x: i32,
        y: i32,
        flags: TextFlags,
        tags: Vec<FormatTag>,
        colour: Colour,
        runs: Vec<StyleRun>,
    },
    /// Render target allocation attempt.
    CreateTarget { width: u32, height: u32, handle: Option<RenderTargetHandle> },
    /// Render target release.
    DestroyTarget(RenderTargetHandle),
    /// Draws redirected into a target.
    EnableTarget { target: RenderTargetHandle, x: i32, y: i32 },
    /// Draws restored to the screen.
    DisableTarget(RenderTargetHandle),
    /// Render target blit.
    DrawTarget { target: RenderTargetHandle, x: i32, y: i32, width: u32, height: u32 },
}

impl DrawCall {
    /// Returns true for calls that put pixels on the current surface.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::Rect { .. }
                | Self::Triangle { .. }
                | Self::Pixel { .. }
                | Self::TexturedRect { .. }
                | Self::Text { .. }
                | Self::DrawTarget { .. }
        )
    }
}

/// Shared view of a [`RecordingRenderer`]'s call log.
///
/// Stays readable after the renderer has been boxed into a [`crate::Ui`].
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    calls: Arc<Mutex<Vec<DrawCall>>>,
}

impl RecordingLog {
    /// Returns a copy of every recorded call.
    #[must_use]
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Counts the calls matching a predicate.
    pub fn count(&self, predicate: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Returns the text of every `Text` call in order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of fonts loaded and not yet destroyed.
    #[must_use]
    pub fn live_fonts(&self) -> usize {
        let calls = self.calls.lock();
        let loaded = calls.iter().filter(|c| matches!(c, DrawCall::LoadFont { handle: Some(_), .. })).count();
        let destroyed = calls.iter().filter(|c| matches!(c, DrawCall::DestroyFont(_))).count();
        loaded.saturating_sub(destroyed)
    }

    /// Number of textures loaded and not yet destroyed.
    #[must_use]
    pub fn live_textures(&self) -> usize {
        let calls = self.calls.lock();
        let loaded = calls.iter().filter(|c| matches!(c, DrawCall::LoadTexture { handle: Some(_), .. })).count();
        let destroyed = calls.iter().filter(|c| matches!(c, DrawCall::DestroyTexture(_))).count();
        loaded.saturating_sub(destroyed)
    }

    fn push(&self, call: DrawCall) {
        self.calls.lock().push(call);
    }
}

/// Backend that draws nothing and records everything.
#[derive(Debug)]
pub struct RecordingRenderer {
    log: RecordingLog,
    available_textures: HashMap<PathBuf, (u32, u32)>,
    fonts: HashMap<u32, u8>,
    textures: HashSet<u32>,
    targets: HashSet<u32>,
    next_handle: u32,
    colour: Colour,
    mode: DrawMode,
    viewport: (u32, u32),
    fail_fonts: bool,
    fail_render_targets: bool,
}

impl RecordingRenderer {
    /// Creates a recorder with no loadable textures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: RecordingLog::default(),
            available_textures: HashMap::new(),
            fonts: HashMap::new(),
            textures: HashSet::new(),
            targets: HashSet::new(),
            next_handle: 1,
            colour: Colour::WHITE,
            mode: DrawMode::Draw2D,
            viewport: (0, 0),
            fail_fonts: false,
            fail_render_targets: false,
        }
    }

    /// Registers a texture path that will load with the given size.
    #[must_use]
    pub fn with_texture(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.available_textures.insert(path.into(), (width, height));
        self
    }

    /// Makes every font load fail.
    #[must_use]
    pub fn without_fonts(mut self) -> Self {
        self.fail_fonts = true;
        self
    }

    /// Makes every render target allocation fail.
    #[must_use]
    pub fn without_render_targets(mut self) -> Self {
        self.fail_render_targets = true;
        self
    }

    /// Returns a handle to the call log.
    #[must_use]
    pub fn log(&self) -> RecordingLog {
        self.log.clone()
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Advance of one character for a font of `size` pixels.
    #[must_use]
    pub const fn char_advance(size: u8) -> u32 {
        let advance = size as u32 / 2;
        if advance == 0 {
            1
        } else {
            advance
        }
    }

    fn allocate(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self) {
        self.log.push(DrawCall::Begin);
    }

    fn end(&mut self) {
        self.log.push(DrawCall::End);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.log.push(DrawCall::Resize { width, height });
    }

    fn set_draw_mode(&mut self, mode: DrawMode) -> DrawMode {
        let previous = std::mem::replace(&mut self.mode, mode);
        if previous != mode {
            self.log.push(DrawCall::DrawMode(mode));
        }
        previous
    }

    fn set_draw_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn set_draw_depth(&mut self, depth: f32) {
        self.log.push(DrawCall::Depth(depth));
    }

    fn set_draw_transform(&mut self, transform: &Mat4) {
        self.log.push(DrawCall::Transform(*transform));
    }

    fn reset_draw_transform(&mut self) {
        self.log.push(DrawCall::ResetTransform);
    }

    fn start_clip(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.log.push(DrawCall::StartClip { x, y, width, height });
    }

    fn end_clip(&mut self) {
        self.log.push(DrawCall::EndClip);
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.log.push(DrawCall::Rect { x, y, width, height, colour: self.colour });
    }

    fn draw_triangle(&mut self, p1: (i32, i32), p2: (i32, i32), p3: (i32, i32)) {
        self.log.push(DrawCall::Triangle { points: [p1, p2, p3], colour: self.colour });
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.log.push(DrawCall::Pixel { x, y, colour: self.colour });
    }

    fn load_texture(&mut self, path: &Path) -> Option<LoadedTexture> {
        let loaded = match self.available_textures.get(path).copied() {
            Some((width, height)) => {
                let raw = self.allocate();
                self.textures.insert(raw);
                Some(LoadedTexture { handle: TextureHandle::from_raw(raw), width, height })
            }
            None => None,
        };
        self.log.push(DrawCall::LoadTexture {
            path: path.to_path_buf(),
            handle: loaded.map(|t| t.handle),
        });
        loaded
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture.raw()) {
            self.log.push(DrawCall::DestroyTexture(texture));
        }
    }

    fn draw_textured_rect(&mut self, texture: TextureHandle, x: i32, y: i32, width: u32, height: u32, uv: [f32; 4]) {
        self.log.push(DrawCall::TexturedRect { texture, x, y, width, height, uv, colour: self.colour });
    }

    fn load_font(&mut self, desc: &FontDesc, _glyphs: RangeInclusive<u32>) -> Option<FontHandle> {
        let handle = if self.fail_fonts {
            None
        } else {
            let raw = self.allocate();
            self.fonts.insert(raw, desc.size);
            Some(FontHandle::from_raw(raw))
        };
        self.log.push(DrawCall::LoadFont { name: desc.name.clone(), size: desc.size, handle });
        handle
    }

    fn destroy_font(&mut self, font: FontHandle) {
        if self.fonts.remove(&font.raw()).is_some() {
            self.log.push(DrawCall::DestroyFont(font));
        }
    }

    fn draw_text(&mut self, font: FontHandle, text: &str, x: i32, y: i32, flags: TextFlags, tags: &[FormatTag]) {
        let tags = if flags.contains(TextFlags::TAGS) { tags.to_vec() } else { Vec::new() };
        let runs = style_runs(text, &tags, self.colour);
        self.log.push(DrawCall::Text {
            font,
            text: text.to_owned(),
            x,
            y,
            flags,
            tags,
            colour: self.colour,
            runs,
        });
    }

    fn measure_text(&mut self, font: FontHandle, text: &str) -> (u32, u32) {
        let Some(&size) = self.fonts.get(&font.raw()) else {
            return (0, 0);
        };
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        if chars == 0 {
            return (0, 0);
        }
        (chars.saturating_mul(Self::char_advance(size)), u32::from(size))
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> Option<RenderTargetHandle> {
        let handle = if self.fail_render_targets || width == 0 || height == 0 {
            None
        } else {
            let raw = self.allocate();
            self.targets.insert(raw);
            Some(RenderTargetHandle::from_raw(raw))
        };
        self.log.push(DrawCall::CreateTarget { width, height, handle });
        handle
    }

    fn destroy_render_target(&mut self, target: RenderTargetHandle) {
        if self.targets.remove(&target.raw()) {
            self.log.push(DrawCall::DestroyTarget(target));
        }
    }

    fn enable_render_target(&mut self, target: RenderTargetHandle, x: i32, y: i32) {
        self.log.push(DrawCall::EnableTarget { target, x, y });
    }

    fn disable_render_target(&mut self, target: RenderTargetHandle) {
        self.log.push(DrawCall::DisableTarget(target));
    }

    fn draw_render_target(&mut self, target: RenderTargetHandle, x: i32, y: i32, width: u32, height: u32) {
        self.log.push(DrawCall::DrawTarget { target, x, y, width, height });
    }
}
