mod firework;
mod particle;

use crate::canvas::Canvas;
use firework::Firework;
use particle::Particle;

const HUE_START: f32 = 120.0;
const HUE_STEP: f32 = 0.5;
const TRAIL_KEEP: f32 = 0.5;
const AUTO_TOTAL: u32 = 80;
const LIMITER_TOTAL: u32 = 100;
const BURST_PARTICLES: usize = 30;

// Pointer state in pixel coordinates, written by the input handler and read
// once per tick. Last write wins.
#[derive(Clone, Copy, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub held: bool,
}

pub struct Show {
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
    hue: f32,
    auto_tick: u32,
    limiter_tick: u32,
    rng: fastrand::Rng,
}

impl Show {
    pub fn new(seed: u64) -> Self {
        Self {
            fireworks: Vec::new(),
            particles: Vec::new(),
            hue: HUE_START,
            auto_tick: 0,
            limiter_tick: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    // One animation tick: fade the surface, draw-then-advance every entity,
    // then run the two launch counters. Caller guarantees one call per tick.
    pub fn frame(&mut self, canvas: &mut Canvas, pointer: Pointer) {
        self.hue += HUE_STEP;
        canvas.fade(TRAIL_KEEP);

        let hue = self.hue;
        let mut bursts: Vec<(f32, f32)> = Vec::new();
        self.fireworks.retain_mut(|fw| {
            fw.draw(canvas, hue);
            let flying = fw.advance();
            if !flying {
                bursts.push((fw.tx, fw.ty));
            }
            flying
        });
        for (x, y) in bursts {
            self.explode(x, y);
        }

        self.particles.retain_mut(|p| {
            p.draw(canvas);
            p.advance()
        });

        let w = canvas.width() as f32;
        let h = canvas.height() as f32;

        // The auto launcher stays armed while the pointer is held and fires
        // on the first un-held tick.
        self.auto_tick += 1;
        if self.auto_tick >= AUTO_TOTAL && !pointer.held {
            let tx = self.rng.f32() * w;
            let ty = self.rng.f32() * (h / 2.0);
            self.launch(w / 2.0, h, tx, ty);
            self.auto_tick = 0;
        }

        self.limiter_tick += 1;
        if self.limiter_tick >= LIMITER_TOTAL && pointer.held {
            self.launch(w / 2.0, h, pointer.x, pointer.y);
            self.limiter_tick = 0;
        }
    }

    fn launch(&mut self, sx: f32, sy: f32, tx: f32, ty: f32) {
        self.fireworks
            .push(Firework::new(sx, sy, tx, ty, &mut self.rng));
    }

    fn explode(&mut self, x: f32, y: f32) {
        for _ in 0..BURST_PARTICLES {
            self.particles
                .push(Particle::new(x, y, self.hue, &mut self.rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Canvas {
        Canvas::new(80, 50, (0, 0, 0))
    }

    #[test]
    fn arrival_bursts_into_thirty_particles_at_the_target() {
        let mut canvas = surface();
        let mut show = Show::new(1);
        show.launch(400.0, 600.0, 400.0, 100.0);

        for tick in 1..=200 {
            show.frame(&mut canvas, Pointer::default());
            if show.fireworks.is_empty() {
                assert_eq!(tick, 53);
                assert_eq!(show.particles.len(), 30);
                for p in &show.particles {
                    // One tick of drift at most: speed < 10, gravity 1.
                    assert!((p.x - 400.0).abs() < 12.0, "particle far from burst x");
                    assert!((p.y - 100.0).abs() < 12.0, "particle far from burst y");
                }
                return;
            }
        }
        panic!("firework never arrived");
    }

    #[test]
    fn auto_launch_fires_on_the_eightieth_tick() {
        let mut canvas = surface();
        let mut show = Show::new(7);

        for tick in 1..=160 {
            show.frame(&mut canvas, Pointer::default());
            match tick {
                1..=79 => assert!(show.fireworks.is_empty(), "early launch at {tick}"),
                80 => assert_eq!(show.fireworks.len(), 1),
                159 => assert!(show.fireworks.is_empty(), "first shell still up"),
                160 => assert_eq!(show.fireworks.len(), 1),
                _ => {}
            }
        }
    }

    #[test]
    fn held_pointer_defers_auto_launch_and_rations_its_own() {
        let mut canvas = surface();
        let mut show = Show::new(11);
        let held = Pointer {
            x: 12.0,
            y: 34.0,
            held: true,
        };

        for tick in 1..=150 {
            show.frame(&mut canvas, held);
            match tick {
                80 => assert!(show.fireworks.is_empty(), "auto launch despite held pointer"),
                100 => {
                    // The limiter shell aims at the pointer.
                    assert_eq!(show.fireworks.len(), 1);
                    assert_eq!(show.fireworks[0].tx, 12.0);
                    assert_eq!(show.fireworks[0].ty, 34.0);
                }
                150 => assert!(show.fireworks.is_empty(), "limiter shell still up"),
                _ => {}
            }
        }

        // Releasing lets the armed auto counter fire immediately.
        show.frame(&mut canvas, Pointer::default());
        assert_eq!(show.fireworks.len(), 1);
        assert!(show.fireworks[0].ty < 25.0, "auto shell aims at the upper half");
    }

    #[test]
    fn hue_drifts_half_a_degree_per_tick() {
        let mut canvas = surface();
        let mut show = Show::new(3);
        for _ in 0..7 {
            show.frame(&mut canvas, Pointer::default());
        }
        assert_eq!(show.hue, HUE_START + 3.5);
    }

    #[test]
    fn seeded_shows_replay_identically() {
        let mut canvas_a = surface();
        let mut canvas_b = surface();
        let mut a = Show::new(42);
        let mut b = Show::new(42);

        for tick in 0..240 {
            let pointer = if (90..150).contains(&tick) {
                Pointer {
                    x: 20.0,
                    y: 10.0,
                    held: true,
                }
            } else {
                Pointer::default()
            };
            a.frame(&mut canvas_a, pointer);
            b.frame(&mut canvas_b, pointer);
        }

        assert_eq!(a.hue, b.hue);
        assert_eq!(a.fireworks.len(), b.fireworks.len());
        assert_eq!(a.particles.len(), b.particles.len());
        for (fa, fb) in a.fireworks.iter().zip(&b.fireworks) {
            assert_eq!((fa.x, fa.y, fa.speed), (fb.x, fb.y, fb.speed));
        }
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!((pa.x, pa.y, pa.alpha), (pb.x, pb.y, pb.alpha));
        }
    }
}
