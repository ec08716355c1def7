use std::io::{BufWriter, Stdout, Write};

// Persistent additive light surface. Strokes add light, `fade` bleeds it
// away, which is what turns last tick's strokes into motion trails instead
// of wiping them. One pixel is half a terminal cell (the presenter packs
// two rows into one `▄`).
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<(f32, f32, f32)>,
    bg: (u8, u8, u8),
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, bg: (u8, u8, u8)) -> Self {
        Self {
            width,
            height,
            pixels: vec![(0.0, 0.0, 0.0); width * height],
            bg,
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn sample(&self, x: i32, y: i32) -> (f32, f32, f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return (0.0, 0.0, 0.0);
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    pub fn clear(&mut self) {
        self.pixels.fill((0.0, 0.0, 0.0));
    }

    // Trail compositing: every tick keeps a fraction of the previous
    // light instead of clearing outright.
    pub fn fade(&mut self, keep: f32) {
        for px in &mut self.pixels {
            px.0 *= keep;
            px.1 *= keep;
            px.2 *= keep;
        }
    }

    pub fn plot(&mut self, x: i32, y: i32, color: (f32, f32, f32)) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let px = &mut self.pixels[idx];
        px.0 += color.0;
        px.1 += color.1;
        px.2 += color.2;
    }

    // Replacement write for backdrop art (gift box); the show itself only
    // ever adds light.
    pub fn set(&mut self, x: i32, y: i32, color: (f32, f32, f32)) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: (f32, f32, f32)) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, color);
            }
        }
    }

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: (f32, f32, f32)) {
        let x1 = x1 as i32;
        let y1 = y1 as i32;
        let mut x = x0 as i32;
        let mut y = y0 as i32;

        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: (f32, f32, f32)) {
        let r = radius.max(0.0);
        let x_lo = (cx - r - 1.0) as i32;
        let x_hi = (cx + r + 1.0) as i32;
        let y_lo = (cy - r - 1.0) as i32;
        let y_hi = (cy + r + 1.0) as i32;

        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if (dist - r).abs() < 0.5 {
                    self.plot(x, y, color);
                }
            }
        }
    }

    pub fn present(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: (u8, u8, u8) = (255, 255, 255);
        let mut prev_bot: (u8, u8, u8) = (255, 255, 255);

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top = self.shade(self.pixels[top_idx]);
                let bot = self.shade(self.pixels[bot_idx]);

                // Only emit color codes if changed
                if top != prev_top {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = top;
                }
                if bot != prev_bot {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = bot;
                }
                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = (255, 255, 255);
            prev_bot = (255, 255, 255);
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        // No flush here: overlays for the same frame still follow, the
        // host flushes once per frame.
        stdout.write_all(&self.output_buf)?;
        Ok(())
    }

    // Overlay lines (the card, the unwrap hint) go on top of the pixel
    // pass as positioned text.
    pub fn overlay_text(
        &self,
        stdout: &mut BufWriter<Stdout>,
        row: u16,
        col: u16,
        fg: (u8, u8, u8),
        bg: (u8, u8, u8),
        text: &str,
    ) -> std::io::Result<()> {
        write!(
            stdout,
            "\x1b[{};{}H\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
            row, col, fg.0, fg.1, fg.2, bg.0, bg.1, bg.2, text
        )?;
        Ok(())
    }

    fn shade(&self, light: (f32, f32, f32)) -> (u8, u8, u8) {
        (
            (self.bg.0 as f32 + light.0 * 255.0).min(255.0) as u8,
            (self.bg.1 as f32 + light.1 * 255.0).min(255.0) as u8,
            (self.bg.2 as f32 + light.2 * 255.0).min(255.0) as u8,
        )
    }
}

// HSL with h in degrees (any value; wraps), s and l in [0, 1]. The show's
// palette lives in HSL because the hue drift is a plain scalar increment.
pub fn hsl(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}
