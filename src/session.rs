/// Round state for a single play session.
///
/// All phase transitions live here so the lifecycle reads as one small
/// state machine: `Idle -> Active -> Ended -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Active,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub score: u32,
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub player_name: Option<String>,
    round_secs: u32,
}

impl Session {
    pub fn new(round_secs: u32) -> Self {
        Self {
            score: 0,
            phase: Phase::Idle,
            seconds_remaining: round_secs,
            player_name: None,
            round_secs,
        }
    }

    /// First scoring interaction starts the round.
    pub fn begin_round(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Active;
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Award pats. Ignored outside the `Active` phase; score never moves
    /// otherwise except through `reset`.
    pub fn award(&mut self, points: u32) {
        if self.phase == Phase::Active {
            self.score += points;
        }
    }

    /// One 1 Hz countdown step. Returns `true` on the tick that ends the
    /// round (the only `Active -> Ended` trigger).
    pub fn countdown_tick(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.phase = Phase::Ended;
            return true;
        }
        false
    }

    /// Back to a fresh `Idle` round; the player name survives so a "play
    /// again" from the leaderboard keeps it prefilled.
    pub fn reset(&mut self) {
        self.score = 0;
        self.seconds_remaining = self.round_secs;
        self.phase = Phase::Idle;
    }
}
