//! Layered composition for floating UI.
//!
//! The compositor owns one base layer the size of the screen plus any number
//! of overlay layers. Overlays are placed in absolute screen coordinates and
//! are independent of whatever drew them, so a dropdown rendered from inside
//! a clipped region still appears in full on top of everything else.
//!
//! Overlays compose in ascending `z` order; among equal `z`, later pushes win.
//! Everything is cleared at the start of each frame.

use crate::buffer::Buffer;
use crate::geometry::Rect;

/// One floating layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Identifier of whoever requested the layer.
    pub owner: String,
    /// Screen area covered by the layer, already clipped to the viewport.
    pub area: Rect,
    pub z: i32,
    buffer: Buffer,
}

impl Layer {
    /// Layer contents in local coordinates (`(0, 0)` is the top-left of `area`).
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}

#[derive(Debug, Clone)]
pub struct Compositor {
    base: Buffer,
    overlays: Vec<Layer>,
}

impl Compositor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            base: Buffer::new(width, height),
            overlays: Vec::new(),
        }
    }

    /// The full screen area.
    pub fn viewport(&self) -> Rect {
        self.base.area()
    }

    pub fn base(&self) -> &Buffer {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Buffer {
        &mut self.base
    }

    pub fn overlays(&self) -> &[Layer] {
        &self.overlays
    }

    /// Start a new frame: blank base, no overlays.
    pub fn clear(&mut self) {
        self.base.clear();
        self.overlays.clear();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.base.width() != width || self.base.height() != height {
            log::debug!("compositor resized to {}x{}", width, height);
            self.base = Buffer::new(width, height);
        }
        self.overlays.clear();
    }

    /// Request an overlay covering `area` and return its buffer for drawing.
    ///
    /// The area is clipped to the viewport; the returned buffer has the clipped size.
    pub fn push_overlay(&mut self, owner: impl Into<String>, area: Rect, z: i32) -> &mut Buffer {
        let area = area.intersect(self.viewport());
        let owner = owner.into();
        log::trace!("overlay for {} at {:?} z={}", owner, area, z);

        // Keep the list sorted by z so composition and hit tests are simple scans.
        let pos = self.overlays.partition_point(|layer| layer.z <= z);
        self.overlays.insert(
            pos,
            Layer {
                owner,
                area,
                z,
                buffer: Buffer::new(area.width, area.height),
            },
        );
        &mut self.overlays[pos].buffer
    }

    /// Topmost overlay covering the given screen point.
    pub fn overlay_at(&self, x: u16, y: u16) -> Option<&Layer> {
        self.overlays
            .iter()
            .rev()
            .find(|layer| layer.area.contains(x, y))
    }

    /// Flatten base and overlays into one screen buffer.
    pub fn compose(&self) -> Buffer {
        let mut out = self.base.clone();
        for layer in &self.overlays {
            out.blit(&layer.buffer, layer.area.x, layer.area.y);
        }
        out
    }
}
