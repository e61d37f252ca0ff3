use rand::seq::SliceRandom;
use rand::Rng;

const SPARKS: [char; 6] = ['*', '+', '✦', '✧', '•', '★'];

const BANNERS: [&str; 4] = ["ALL DONE!", "DECK CLEARED!", "CLASS DISMISSED!", "WELL DONE!"];

/// Animation length in UI ticks.
pub const CELEBRATION_TICKS: u32 = 30;

/// Seconds of simulated motion per tick.
const DT: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    /// Banner letters glide to a fixed slot; sparks fall.
    pub target: Option<(f64, f64)>,
}

impl Particle {
    fn spark<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SPARKS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            target: None,
        }
    }

    fn letter(from: (f64, f64), to: (f64, f64), symbol: char, color_index: usize) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index,
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    fn step(&mut self) {
        match self.target {
            Some((tx, ty)) => {
                if ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt() > 1.0 {
                    self.x += self.vel_x * DT;
                    self.y += self.vel_y * DT;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = tx;
                    self.y = ty;
                }
            }
            None => {
                self.x += self.vel_x * DT;
                self.y += self.vel_y * DT;
                self.vel_y += 15.0 * DT;
            }
        }
    }
}

/// Short burst shown when the last card is answered.
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub banner: &'static str,
    ticks_left: u32,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }

    pub fn start(&mut self, width: u16, height: u16) {
        self.start_with(width, height, &mut rand::thread_rng());
    }

    pub fn start_with<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.particles.clear();
        self.ticks_left = CELEBRATION_TICKS;
        self.width = f64::from(width);
        self.height = f64::from(height);
        self.banner = BANNERS.choose(rng).copied().unwrap_or(BANNERS[0]);

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let spacing = 2.0;
        let left = cx - (self.banner.chars().count() as f64 - 1.0) * spacing / 2.0;

        for (i, ch) in self.banner.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let from = (cx + rng.gen_range(-10.0..10.0), cy + rng.gen_range(-5.0..5.0));
            let to = (left + i as f64 * spacing, cy - 2.0);
            self.particles
                .push(Particle::letter(from, to, ch, rng.gen_range(0..7)));
        }

        for _ in 0..25 {
            let x = cx + rng.gen_range(-15.0..15.0);
            let y = cy + rng.gen_range(-8.0..8.0);
            self.particles.push(Particle::spark(x, y, rng));
        }
    }

    /// Advance one UI tick.
    pub fn update(&mut self) {
        if self.ticks_left == 0 {
            return;
        }
        self.ticks_left -= 1;
        if self.ticks_left == 0 {
            self.particles.clear();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            p.step();
            p.is_letter() || (p.y <= height + 5.0 && p.x >= -5.0 && p.x <= width + 5.0)
        });
    }
}
