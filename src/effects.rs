use std::time::{Duration, Instant};

use rand::Rng;

use crate::surface::Point;

pub const SPARKLES_PER_BURST: usize = 8;
pub const SPARKLE_TTL: Duration = Duration::from_millis(800);
pub const SCORE_BUMP_TTL: Duration = Duration::from_millis(1000);

/// One sparkle of a burst, offset from the burst origin on a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub pos: Point,
    /// Render-side animation delay, seconds (0.0..0.3).
    pub fade_delay: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    SparkleBurst { sparkles: Vec<Sparkle> },
    ScoreBump { points: u32, bonus: bool },
}

/// A transient visual event. Purely decorative: never touches score or
/// phase, and removes itself from the set once its TTL elapses.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub id: u64,
    pub origin: Point,
    pub kind: EffectKind,
    spawned_at: Instant,
    ttl: Duration,
}

impl Effect {
    pub fn expires_at(&self) -> Instant {
        self.spawned_at + self.ttl
    }

    /// Fraction of lifetime left in `0.0..=1.0`, for fade styling.
    pub fn remaining_life(&self, now: Instant) -> f64 {
        let lived = now.saturating_duration_since(self.spawned_at);
        if lived >= self.ttl {
            return 0.0;
        }
        1.0 - lived.as_secs_f64() / self.ttl.as_secs_f64()
    }
}

/// All live effects, owned by the session controller. The presentation
/// layer only iterates the current set.
#[derive(Debug, Default)]
pub struct EffectSet {
    effects: Vec<Effect>,
    next_id: u64,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Eight sparkles on a ring around `origin`, each at a random distance
    /// of 2..5 cells with a random fade delay.
    pub fn spawn_sparkle_burst<R: Rng>(&mut self, origin: Point, now: Instant, rng: &mut R) -> u64 {
        let sparkles = (0..SPARKLES_PER_BURST)
            .map(|i| {
                let angle = (i as f64 / SPARKLES_PER_BURST as f64) * std::f64::consts::TAU;
                let distance = rng.gen_range(2.0..5.0);
                Sparkle {
                    pos: origin.offset(angle.cos() * distance, angle.sin() * distance),
                    fade_delay: rng.gen_range(0.0..0.3),
                }
            })
            .collect();

        self.push(origin, EffectKind::SparkleBurst { sparkles }, SPARKLE_TTL, now)
    }

    pub fn spawn_score_bump(&mut self, origin: Point, points: u32, bonus: bool, now: Instant) -> u64 {
        self.push(
            origin,
            EffectKind::ScoreBump { points, bonus },
            SCORE_BUMP_TTL,
            now,
        )
    }

    fn push(&mut self, origin: Point, kind: EffectKind, ttl: Duration, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.effects.push(Effect {
            id,
            origin,
            kind,
            spawned_at: now,
            ttl,
        });
        id
    }

    /// Drop everything past its TTL. Called from the controller's regular
    /// advance, so no effect outlives its deadline by more than one tick.
    pub fn prune(&mut self, now: Instant) {
        self.effects.retain(|e| now < e.expires_at());
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
