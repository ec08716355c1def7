/// Fixed-capacity ring of recent positions. `push` overwrites the oldest
/// slot in place, so a trail never reallocates after construction.
pub struct Trail {
    points: Vec<(f32, f32)>,
    cursor: usize,
}

impl Trail {
    /// Every slot starts at the spawn position, so the first strokes
    /// collapse to a dot instead of sweeping in from (0, 0).
    pub fn new(capacity: usize, x: f32, y: f32) -> Self {
        Self {
            points: vec![(x, y); capacity],
            cursor: 0,
        }
    }

    pub fn push(&mut self, x: f32, y: f32) {
        self.points[self.cursor] = (x, y);
        self.cursor = (self.cursor + 1) % self.points.len();
    }

    /// The position pushed `capacity` pushes ago (the slot the next
    /// `push` will overwrite).
    pub fn oldest(&self) -> (f32, f32) {
        self.points[self.cursor]
    }
}
