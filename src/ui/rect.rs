//! Screen-space rectangles for panel layout

/// A rectangle in screen pixels, origin at the top-left
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn aspect(&self) -> f32 {
        if self.h > 0.0 { self.w / self.h } else { 1.0 }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Split at a fixed pixel offset from the left, returns (left, right)
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Strip of `height` from the bottom
    pub fn slice_bottom(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.bottom() - h, self.w, h)
    }

    /// Column `index` of `count` equal columns separated by `gap`
    pub fn column(&self, index: usize, count: usize, gap: f32) -> Self {
        let count = count.max(1);
        let w = ((self.w - gap * (count - 1) as f32) / count as f32).max(0.0);
        Self::new(self.x + index as f32 * (w + gap), self.y, w, self.h)
    }
}
