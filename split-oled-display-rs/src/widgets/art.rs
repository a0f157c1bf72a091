//! Full-screen slideshow art for the peripheral half.
//!
//! Frames are 1-bpp, 128×32, MSB-first rows (the `ImageRaw<BinaryColor>`
//! layout). The bundled frames are placeholder patterns generated at
//! compile time; firmware can supply its own through [`Slideshow::new`].

use embedded_graphics::{
    image::{GetPixel, ImageRaw},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::PointsIter,
};

use super::draw::Palette;
use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Bytes in one 128×32 1-bpp frame.
pub const FRAME_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 8;

/// Raw frame data.
pub type Frame = [u8; FRAME_BYTES];

#[derive(Clone, Copy)]
enum Pattern {
    DiagonalStripes,
    Checkerboard,
    NestedFrames,
    Wave,
}

const fn ink(pattern: Pattern, x: usize, y: usize) -> bool {
    match pattern {
        Pattern::DiagonalStripes => (x + y) % 8 < 3,
        Pattern::Checkerboard => (x / 8 + y / 8) % 2 == 0,
        Pattern::NestedFrames => {
            let dx = if x < SCREEN_WIDTH - 1 - x { x } else { SCREEN_WIDTH - 1 - x };
            let dy = if y < SCREEN_HEIGHT - 1 - y { y } else { SCREEN_HEIGHT - 1 - y };
            let d = if dx < dy { dx } else { dy };
            d % 4 == 0
        }
        Pattern::Wave => {
            // Triangle wave, period 32 px, amplitude 12 px around mid-height.
            let phase = x % 32;
            let offset = if phase < 16 { phase } else { 32 - phase };
            let wave_y = 4 + offset * 24 / 16;
            wave_y == y || wave_y + 1 == y
        }
    }
}

const fn render(pattern: Pattern) -> Frame {
    let mut frame = [0u8; FRAME_BYTES];
    let mut y = 0;
    while y < SCREEN_HEIGHT {
        let mut x = 0;
        while x < SCREEN_WIDTH {
            if ink(pattern, x, y) {
                frame[(y * SCREEN_WIDTH + x) / 8] |= 0x80 >> (x % 8);
            }
            x += 1;
        }
        y += 1;
    }
    frame
}

static DIAGONAL_STRIPES: Frame = render(Pattern::DiagonalStripes);
static CHECKERBOARD: Frame = render(Pattern::Checkerboard);
static NESTED_FRAMES: Frame = render(Pattern::NestedFrames);
static WAVE: Frame = render(Pattern::Wave);

/// Bundled placeholder art, in display order.
pub static PLACEHOLDER_ART: [&Frame; 4] = [&DIAGONAL_STRIPES, &CHECKERBOARD, &NESTED_FRAMES, &WAVE];

/// Endless slideshow over a fixed set of frames.
///
/// One cycle through all frames lasts `duration_ms`; each frame is shown
/// for an equal share of it.
#[derive(Clone, Copy)]
pub struct Slideshow {
    frames: &'static [&'static Frame],
    duration_ms: u32,
}

impl Slideshow {
    pub const fn new(frames: &'static [&'static Frame], duration_ms: u32) -> Self {
        Self { frames, duration_ms }
    }

    /// Slideshow over [`PLACEHOLDER_ART`].
    pub fn placeholder(duration_ms: u32) -> Self {
        Self::new(&PLACEHOLDER_ART, duration_ms)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time each frame stays on screen, at least 1 ms.
    pub fn frame_period_ms(&self) -> u32 {
        if self.frames.is_empty() {
            return self.duration_ms.max(1);
        }
        (self.duration_ms / self.frames.len() as u32).max(1)
    }

    /// Frame shown `elapsed_ms` after the slideshow started.
    ///
    /// Returns `None` when there are no frames, and frame 0 when the
    /// duration is zero.
    pub fn frame_index_at(&self, elapsed_ms: u64) -> Option<usize> {
        let n = self.frames.len() as u64;
        if n == 0 {
            return None;
        }
        let duration = self.duration_ms as u64;
        if duration == 0 {
            return Some(0);
        }
        let index = (elapsed_ms % duration) * n / duration;
        Some(index as usize)
    }

    /// Milliseconds from `elapsed_ms` until the shown frame changes.
    ///
    /// `None` when it never changes: fewer than two frames, or a zero
    /// duration pinning frame 0.
    pub fn ms_until_next_frame(&self, elapsed_ms: u64) -> Option<u64> {
        let n = self.frames.len() as u64;
        let duration = self.duration_ms as u64;
        if n < 2 || duration == 0 {
            return None;
        }
        let t = elapsed_ms % duration;
        let index = t * n / duration;
        // First instant at which frame_index_at reaches index + 1.
        let next = ((index + 1) * duration).div_ceil(n);
        Some(next - t)
    }

    /// Frame `index` as an image, or `None` if out of range.
    pub fn frame(&self, index: usize) -> Option<ImageRaw<'static, BinaryColor>> {
        self.frames
            .get(index)
            .map(|&data| ImageRaw::new(data, SCREEN_WIDTH as u32))
    }

    /// Draw frame `index` full-screen, mapping ink through `palette`.
    pub fn draw_frame<D>(
        &self,
        target: &mut D,
        index: usize,
        palette: Palette,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(raw) = self.frame(index) else {
            return Ok(());
        };
        let pixels = raw
            .bounding_box()
            .points()
            .filter_map(|p| raw.pixel(p).map(|c| Pixel(p, palette.map(c))));
        target.draw_iter(pixels)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
