use crate::canvas::{Canvas, hsl};

// Unwrap delays in ticks at the 60 Hz rate: 2 s, 2 s, 1 s. The first click
// arms the chain; the steps then run on their own.
const STEP_DELAYS: [u32; 3] = [120, 120, 60];

const BODY: (f32, f32, f32) = (0.72, 0.15, 0.19);
const LID: (f32, f32, f32) = (0.84, 0.24, 0.26);
const RIBBON: (f32, f32, f32) = (0.95, 0.78, 0.25);
const INTERIOR: (f32, f32, f32) = (0.08, 0.05, 0.04);

// The reveal that precedes the show: a wrapped box, one click, a timed
// unwrap. Steps: 0 waiting, 1 armed, 2 lid lifting, 3 open, 4 done.
pub struct GiftBox {
    step: usize,
    step_tick: u32,
    age: u32,
}

impl GiftBox {
    pub fn new() -> Self {
        Self {
            step: 0,
            step_tick: 0,
            age: 0,
        }
    }

    // Only the first click does anything; the chain cannot be restarted
    // or hurried.
    pub fn click(&mut self) {
        if self.step == 0 {
            self.step = 1;
            self.step_tick = 0;
        }
    }

    pub fn tick(&mut self) {
        self.age += 1;
        if (1..=3).contains(&self.step) {
            self.step_tick += 1;
            if self.step_tick >= STEP_DELAYS[self.step - 1] {
                self.step += 1;
                self.step_tick = 0;
            }
        }
    }

    pub fn revealed(&self) -> bool {
        self.step >= 4
    }

    pub fn awaiting_click(&self) -> bool {
        self.step == 0
    }

    // Full redraw every frame; the reveal has no trails.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.clear();

        let w = canvas.width() as i32;
        let h = canvas.height() as i32;
        let bw = (w / 3).clamp(8, 36);
        let bh = (bw * 2 / 3).max(6);
        let cx = w / 2;
        let y1 = h / 2 + bh / 2;
        let y0 = y1 - bh + 1;
        let x0 = cx - bw / 2;
        let x1 = x0 + bw - 1;

        match self.step {
            0 | 1 => self.draw_wrapped(canvas, cx, x0, y0, x1, y1),
            2 => self.draw_lifting(canvas, cx, x0, y0, x1, y1),
            _ => self.draw_open(canvas, cx, x0, y0, x1, y1),
        }

        if self.step >= 1 {
            self.draw_sparkles(canvas);
        }
    }

    fn draw_wrapped(&self, canvas: &mut Canvas, cx: i32, x0: i32, y0: i32, x1: i32, y1: i32) {
        canvas.fill_rect(x0, y0, x1, y1, BODY);

        // Ribbon cross and a two-lobed bow on top.
        let rw = ((x1 - x0) / 8).max(1);
        let ym = (y0 + y1) / 2;
        canvas.fill_rect(cx - rw / 2, y0, cx + rw / 2, y1, RIBBON);
        canvas.fill_rect(x0, ym - rw / 2, x1, ym + rw / 2, RIBBON);
        canvas.fill_rect(cx - 3, y0 - 2, cx - 1, y0 - 1, RIBBON);
        canvas.fill_rect(cx + 1, y0 - 2, cx + 3, y0 - 1, RIBBON);
        canvas.set(cx, y0 - 1, RIBBON);
    }

    fn draw_lifting(&self, canvas: &mut Canvas, cx: i32, x0: i32, y0: i32, x1: i32, y1: i32) {
        // The lid floats upward through the step; light spills out of the gap.
        let lift = 2 + (self.step_tick / 15) as i32;
        let lid_h = ((y1 - y0) / 4).max(2);
        let body_top = y0 + lid_h;

        canvas.fill_rect(x0, body_top, x1, y1, BODY);
        let rw = ((x1 - x0) / 8).max(1);
        canvas.fill_rect(cx - rw / 2, body_top, cx + rw / 2, y1, RIBBON);

        canvas.fill_rect(x0 - 1, y0 - lift - lid_h, x1 + 1, y0 - lift, LID);

        let glow = hsl(46.0, 1.0, 0.55);
        for y in (y0 - lift + 1)..body_top {
            canvas.line(x0 as f32 + 1.0, y as f32, x1 as f32 - 1.0, y as f32, glow);
        }
    }

    fn draw_open(&self, canvas: &mut Canvas, cx: i32, x0: i32, y0: i32, x1: i32, y1: i32) {
        let lid_h = ((y1 - y0) / 4).max(2);
        let body_top = y0 + lid_h;

        canvas.fill_rect(x0, body_top, x1, y1, BODY);
        canvas.fill_rect(x0 + 1, body_top, x1 - 1, body_top + 1, INTERIOR);

        // The lid rests beside the box; rays fan out of the mouth and
        // breathe with time.
        canvas.fill_rect(x1 + 3, y1 - lid_h, x1 + 3 + lid_h, y1, LID);

        let t = self.age as f32 / 60.0;
        let mouth_y = body_top as f32;
        let reach = (y1 - y0) as f32;
        for k in 0..7 {
            let a = (k as f32 - 3.0) * 0.35;
            let len = reach * (0.9 + 0.25 * (t * 3.0 + k as f32).sin());
            let color = hsl(40.0 + k as f32 * 4.0, 1.0, 0.3);
            canvas.line(
                cx as f32,
                mouth_y,
                cx as f32 + a.sin() * len,
                mouth_y - a.cos() * len,
                color,
            );
        }
    }

    // Hash-seeded twinkle field, phase driven by the box age.
    fn draw_sparkles(&self, canvas: &mut Canvas) {
        let w = canvas.width();
        let h = canvas.height();
        let t = self.age as f32 / 60.0;

        for i in 0..(w * h) / 160 {
            let seed = i as f64 * 123.456;
            let x = ((seed * 7919.0) % w as f64) as i32;
            let y = ((seed * 7907.0) % h as f64) as i32;
            let phase = (seed % 1000.0) as f32 / 1000.0 * std::f32::consts::PI * 2.0;
            let speed = 1.0 + ((seed % 200.0) / 100.0) as f32;

            let twinkle = ((t * speed + phase).sin() * 0.5 + 0.5).powf(2.0);
            if twinkle > 0.3 {
                let lum = (twinkle - 0.3) * 0.6;
                canvas.plot(x, y, (lum, lum * 0.95, lum * 0.75));
            }
        }
    }
}
