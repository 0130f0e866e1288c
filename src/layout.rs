/// Row-major grid of holes on a canvas. Slot 1 is top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub width: f64,
    pub height: f64,
    pub slot_count: usize,
}

impl GridLayout {
    /// At most three holes per row, like the reference 3 x 2 board.
    pub fn new(slot_count: usize, width: f64, height: f64) -> Self {
        let cols = slot_count.clamp(1, 3);
        let rows = slot_count.div_ceil(cols).max(1);
        Self {
            cols,
            rows,
            width,
            height,
            slot_count,
        }
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (self.width / self.cols as f64, self.height / self.rows as f64)
    }

    /// Centre of a slot's cell in canvas coordinates.
    pub fn center(&self, slot: usize) -> Option<(f64, f64)> {
        if slot == 0 || slot > self.slot_count {
            return None;
        }
        let idx = slot - 1;
        let (cw, ch) = self.cell_size();
        let col = (idx % self.cols) as f64;
        let row = (idx / self.cols) as f64;
        Some((col * cw + cw / 2.0, row * ch + ch / 2.0))
    }

    /// Radius of the hole drawn in every cell.
    pub fn hole_radius(&self) -> f64 {
        let (cw, ch) = self.cell_size();
        cw.min(ch) * 0.38
    }

    /// Slot under a canvas-local pointer position. Cells in the last row past
    /// `slot_count` are empty.
    pub fn slot_at(&self, x: f64, y: f64) -> Option<usize> {
        if x < 0.0 || y < 0.0 || x >= self.width || y >= self.height {
            return None;
        }
        let (cw, ch) = self.cell_size();
        let col = (x / cw).floor() as usize;
        let row = (y / ch).floor() as usize;
        let slot = row * self.cols + col + 1;
        (slot <= self.slot_count).then_some(slot)
    }
}
