use crate::canvas::{Canvas, hsl};
use crate::trail::Trail;

const TRAIL_LEN: usize = 5;

// One fragment of an explosion, in free flight until its glow fades out.
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub trail: Trail,
    pub angle: f32,
    pub speed: f32,
    pub friction: f32,
    pub gravity: f32,
    pub hue: f32,
    pub brightness: f32,
    pub alpha: f32,
    pub decay: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, show_hue: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            x,
            y,
            trail: Trail::new(TRAIL_LEN, x, y),
            angle: rng.f32() * std::f32::consts::PI * 2.0,
            speed: 1.0 + rng.f32() * 9.0,
            friction: 0.95,
            gravity: 1.0,
            // Stay within +-20 of the show's hue so one burst reads as
            // a single shifting color, not confetti.
            hue: show_hue - 20.0 + rng.f32() * 40.0,
            brightness: 50.0 + rng.f32() * 30.0,
            alpha: 1.0,
            decay: 0.015 + rng.f32() * 0.015,
        }
    }

    // Advance one tick. Returns false once the fragment has faded
    // (alpha at or below its own decay rate, checked after the decay).
    pub fn advance(&mut self) -> bool {
        self.trail.push(self.x, self.y);
        self.speed *= self.friction;
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed + self.gravity;
        self.alpha -= self.decay;
        self.alpha > self.decay
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        let (r, g, b) = hsl(self.hue, 1.0, self.brightness / 100.0);
        let color = (r * self.alpha, g * self.alpha, b * self.alpha);
        let (ox, oy) = self.trail.oldest();
        canvas.line(ox, oy, self.x, self.y, color);
    }
}
