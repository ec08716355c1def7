use crate::canvas::{Canvas, hsl};
use crate::trail::Trail;

const TRAIL_LEN: usize = 3;

fn distance(x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let dx = x0 - x1;
    let dy = y0 - y1;
    (dx * dx + dy * dy).sqrt()
}

// A shell climbing from its launch point toward a target. Speed compounds
// multiplicatively each tick, so launches start lazy and finish fast.
pub struct Firework {
    pub x: f32,
    pub y: f32,
    pub sx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
    pub distance_to_target: f32,
    pub distance_traveled: f32,
    pub trail: Trail,
    pub angle: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub brightness: f32,
    pub target_radius: f32,
}

impl Firework {
    pub fn new(sx: f32, sy: f32, tx: f32, ty: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: sx,
            y: sy,
            sx,
            sy,
            tx,
            ty,
            distance_to_target: distance(sx, sy, tx, ty),
            distance_traveled: 0.0,
            trail: Trail::new(TRAIL_LEN, sx, sy),
            angle: (ty - sy).atan2(tx - sx),
            speed: 2.0,
            acceleration: 1.05,
            brightness: 50.0 + rng.f32() * 20.0,
            target_radius: 1.0,
        }
    }

    // Advance one tick. Returns false on arrival; the arrival move is not
    // committed, the traveled distance is measured against the hypothetical
    // next position.
    pub fn advance(&mut self) -> bool {
        self.trail.push(self.x, self.y);

        if self.target_radius < 8.0 {
            self.target_radius += 0.3;
        } else {
            self.target_radius = 1.0;
        }

        self.speed *= self.acceleration;
        let vx = self.angle.cos() * self.speed;
        let vy = self.angle.sin() * self.speed;
        self.distance_traveled = distance(self.sx, self.sy, self.x + vx, self.y + vy);

        if self.distance_traveled >= self.distance_to_target {
            false
        } else {
            self.x += vx;
            self.y += vy;
            true
        }
    }

    pub fn draw(&self, canvas: &mut Canvas, hue: f32) {
        let color = hsl(hue, 1.0, self.brightness / 100.0);
        let (ox, oy) = self.trail.oldest();
        canvas.line(ox, oy, self.x, self.y, color);
        canvas.stroke_circle(self.tx, self.ty, self.target_radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_traveled_is_monotonic() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut fw = Firework::new(10.0, 90.0, 70.0, 20.0, &mut rng);
        let mut last = fw.distance_traveled;
        for _ in 0..200 {
            let alive = fw.advance();
            assert!(
                fw.distance_traveled >= last,
                "traveled distance shrank from {} to {}",
                last,
                fw.distance_traveled
            );
            last = fw.distance_traveled;
            if !alive {
                return;
            }
        }
        panic!("firework never arrived");
    }

    #[test]
    fn arrival_matches_geometric_series_bound() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut fw = Firework::new(400.0, 600.0, 400.0, 100.0, &mut rng);
        assert_eq!(fw.distance_to_target, 500.0);

        let mut ticks = 0u32;
        loop {
            ticks += 1;
            if !fw.advance() {
                break;
            }
            assert!(ticks < 1000, "runaway firework");
        }

        // Speeds form the series 2*1.05^k, so the straight-line climb
        // covers its 500 units on the tick given by the series bound.
        let expected = ((1.0_f32 + 500.0 * 0.05 / (2.0 * 1.05)).ln() / 1.05_f32.ln()).ceil() as u32;
        assert_eq!(ticks, expected);
        assert_eq!(ticks, 53);
    }

    #[test]
    fn arrival_move_is_not_committed() {
        let mut rng = fastrand::Rng::with_seed(6);
        let mut fw = Firework::new(0.0, 100.0, 0.0, 0.0, &mut rng);
        loop {
            let (x, y) = (fw.x, fw.y);
            if !fw.advance() {
                assert_eq!((fw.x, fw.y), (x, y), "arrival tick moved the shell");
                assert!(fw.distance_traveled >= fw.distance_to_target);
                break;
            }
        }
    }

    #[test]
    fn target_ring_pulses_within_bounds() {
        let mut rng = fastrand::Rng::with_seed(8);
        let mut fw = Firework::new(0.0, 500.0, 0.0, 0.0, &mut rng);
        let mut wrapped = false;
        let mut last = fw.target_radius;
        for _ in 0..40 {
            fw.advance();
            assert!(fw.target_radius >= 1.0 && fw.target_radius < 8.5);
            if fw.target_radius < last {
                wrapped = true;
            }
            last = fw.target_radius;
        }
        assert!(wrapped, "ring never cycled back to its smallest radius");
    }
}
