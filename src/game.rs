use chrono::Local;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc::Receiver;
use std::time::Instant;

use crate::config::Config;
use crate::effects::EffectSet;
use crate::leaderboard::{LocalScoreCache, ScoreEntry, ScoreStore};
use crate::schedule::RepeatingTask;
use crate::session::{Phase, Session};
use crate::surface::{BonusRegion, Point, TargetBounds};

/// Live click-and-drag state while the pointer is held down.
#[derive(Debug, Clone, Copy)]
struct Petting {
    bounds: TargetBounds,
    latest: Point,
    last_pet_at: Instant,
}

/// The session controller: owns phase, score, countdown, petting cadence,
/// ambient decoration, the transient effect set, and the leaderboard
/// snapshot. The UI only reads state from here and feeds pointer events in.
pub struct Game {
    pub session: Session,
    pub effects: EffectSet,
    pub config: Config,
    bonus: BonusRegion,
    rng: SmallRng,
    store: Box<dyn ScoreStore>,
    local_cache: LocalScoreCache,
    leaderboard: Vec<ScoreEntry>,
    score_sub: Option<Receiver<Vec<ScoreEntry>>>,
    /// Set after the first snapshot arrives; the UI shows a loading line
    /// until then.
    pub leaderboard_loaded: bool,
    /// Once a store write fails the local list is the leaderboard for the
    /// rest of the session; later store pushes are ignored.
    pub using_local_scores: bool,
    pub show_leaderboard: bool,
    pub has_interacted: bool,
    countdown: RepeatingTask,
    pet_poll: RepeatingTask,
    ambient: RepeatingTask,
    petting: Option<Petting>,
    clicked_until: Option<Instant>,
    viewport: TargetBounds,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("session", &self.session)
            .field("effects", &self.effects)
            .field("petting", &self.petting)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(
        config: Config,
        mut store: Box<dyn ScoreStore>,
        local_cache: LocalScoreCache,
        now: Instant,
    ) -> Self {
        Self::build(config, store.as_mut(), now, SmallRng::from_entropy()).attach(store, local_cache)
    }

    /// Deterministic RNG for tests.
    pub fn new_seeded(
        config: Config,
        mut store: Box<dyn ScoreStore>,
        local_cache: LocalScoreCache,
        now: Instant,
        seed: u64,
    ) -> Self {
        Self::build(config, store.as_mut(), now, SmallRng::seed_from_u64(seed))
            .attach(store, local_cache)
    }

    fn build(config: Config, store: &mut dyn ScoreStore, now: Instant, rng: SmallRng) -> GameParts {
        let score_sub = store.subscribe(config.leaderboard_limit);
        let mut ambient = RepeatingTask::new(config.ambient_interval());
        ambient.start(now);

        GameParts {
            session: Session::new(config.round_secs),
            countdown: RepeatingTask::new(std::time::Duration::from_secs(1)),
            pet_poll: RepeatingTask::new(config.pet_poll()),
            ambient,
            score_sub,
            rng,
            config,
        }
    }

    /// Direct click entry point. Suppressed while the 150ms click flash
    /// from the previous hit is still live.
    pub fn register_click(&mut self, point: Point, bounds: TargetBounds, now: Instant) {
        if self.click_flash_active(now) {
            return;
        }
        self.register_interaction(point, bounds, now);
    }

    /// Score one interaction at `point` within `bounds`.
    ///
    /// The first interaction of a session starts the round and the 1 Hz
    /// countdown. Outside the `Active` phase nothing is awarded.
    pub fn register_interaction(&mut self, point: Point, bounds: TargetBounds, now: Instant) {
        if self.session.phase == Phase::Idle {
            self.session.begin_round();
            self.countdown.start(now);
        }
        if !self.session.is_active() {
            return;
        }
        self.has_interacted = true;

        let bonus = bounds
            .relative_percent(point)
            .map(|(x_pct, y_pct)| self.bonus.hit(x_pct, y_pct))
            .unwrap_or(false);
        let points = if bonus {
            self.config.bonus_points
        } else {
            self.config.base_points
        };

        self.session.award(points);
        self.effects.spawn_score_bump(point, points, bonus, now);
        if bonus {
            self.effects.spawn_sparkle_burst(point, now, &mut self.rng);
            self.effects
                .spawn_sparkle_burst(point.offset(4.0, -2.0), now, &mut self.rng);
            self.effects
                .spawn_sparkle_burst(point.offset(-4.0, 2.0), now, &mut self.rng);
        } else {
            self.effects.spawn_sparkle_burst(point, now, &mut self.rng);
        }

        self.clicked_until = Some(now + self.config.click_flash());
    }

    pub fn click_flash_active(&self, now: Instant) -> bool {
        self.clicked_until.is_some_and(|until| now < until)
    }

    /// Pointer went down: start the drag-to-pet cadence. Does not score by
    /// itself; the accompanying click does.
    pub fn begin_petting(&mut self, point: Point, bounds: TargetBounds, now: Instant) {
        self.petting = Some(Petting {
            bounds,
            latest: point,
            last_pet_at: now,
        });
        self.pet_poll.start(now);
    }

    /// Track the pointer during a drag, with a cosmetic (unscored) sparkle
    /// roll per move event.
    pub fn update_petting(&mut self, point: Point, now: Instant) {
        let Some(pet) = &mut self.petting else {
            return;
        };
        pet.latest = point;
        if self.rng.gen_bool(self.config.drag_sparkle_chance) {
            self.effects.spawn_sparkle_burst(point, now, &mut self.rng);
        }
    }

    /// Pointer released or left the surface. Safe to call when not petting.
    pub fn end_petting(&mut self) {
        self.petting = None;
        self.pet_poll.cancel();
    }

    pub fn is_petting(&self) -> bool {
        self.petting.is_some()
    }

    /// Drive everything due at `now`: countdown, petting cadence, ambient
    /// sparkles, effect expiry, leaderboard pushes. Called from the 100ms
    /// base tick.
    pub fn advance(&mut self, now: Instant) {
        for _ in 0..self.countdown.fire_if_due(now) {
            if self.session.countdown_tick() {
                // Round over: countdown and petting both stop here
                self.countdown.cancel();
                self.end_petting();
            }
        }

        if self.pet_poll.fire_if_due(now) > 0 {
            if let Some(pet) = self.petting {
                if now.duration_since(pet.last_pet_at) >= self.config.pet_interval() {
                    self.register_interaction(pet.latest, pet.bounds, now);
                    if let Some(pet) = &mut self.petting {
                        pet.last_pet_at = now;
                    }
                }
            }
        }

        for _ in 0..self.ambient.fire_if_due(now) {
            self.roll_ambient_sparkle(now);
        }

        self.effects.prune(now);
        self.drain_score_updates();
    }

    /// Low-frequency decorative burst at a random viewport point. Never
    /// touches score or phase.
    fn roll_ambient_sparkle(&mut self, now: Instant) {
        if self.click_flash_active(now) || self.petting.is_some() {
            return;
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return;
        }
        if !self.rng.gen_bool(self.config.ambient_sparkle_chance) {
            return;
        }
        let point = Point::new(
            self.rng
                .gen_range(self.viewport.x..self.viewport.x + self.viewport.width),
            self.rng
                .gen_range(self.viewport.y..self.viewport.y + self.viewport.height),
        );
        self.effects.spawn_sparkle_burst(point, now, &mut self.rng);
    }

    /// Submit the round's score under `name`. Empty (after trim) is
    /// rejected silently; the leaderboard view opens either way. A failed
    /// store write falls back to the device-local list.
    pub fn submit_score(&mut self, name: &str) {
        self.show_leaderboard = true;

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let name: String = trimmed.chars().take(self.config.max_name_len).collect();
        self.session.player_name = Some(name.clone());

        let entry = ScoreEntry::new(name, self.session.score, Local::now());
        match self.store.insert(&entry) {
            Ok(()) => self.drain_score_updates(),
            Err(_) => {
                // Degrade to the local list so the submission is still
                // visible; never retried against the store.
                if let Ok(list) = self.local_cache.record(entry, self.config.leaderboard_limit) {
                    self.leaderboard = list;
                    self.leaderboard_loaded = true;
                    self.using_local_scores = true;
                }
            }
        }
    }

    pub fn leaderboard(&self) -> &[ScoreEntry] {
        &self.leaderboard
    }

    /// Abandon the current round without clearing the player name.
    pub fn cancel_round(&mut self) {
        self.session.reset();
        self.countdown.cancel();
        self.end_petting();
    }

    /// Fresh session from the leaderboard view.
    pub fn new_game(&mut self) {
        self.cancel_round();
        self.session.player_name = None;
        self.show_leaderboard = false;
    }

    /// Cancel every scheduled task and release the store subscription.
    /// Idempotent; called on unmount/teardown.
    pub fn shutdown(&mut self) {
        self.countdown.cancel();
        self.pet_poll.cancel();
        self.ambient.cancel();
        self.petting = None;
        self.score_sub = None;
    }

    pub fn set_viewport(&mut self, bounds: TargetBounds) {
        self.viewport = bounds;
    }

    fn drain_score_updates(&mut self) {
        if self.using_local_scores {
            return;
        }
        if let Some(rx) = &self.score_sub {
            while let Ok(snapshot) = rx.try_recv() {
                self.leaderboard = snapshot;
                self.leaderboard_loaded = true;
            }
        }
    }
}

/// Intermediate pieces from `build`, joined with the store handles in
/// `attach`. Keeps the two constructors from duplicating the wiring.
struct GameParts {
    session: Session,
    countdown: RepeatingTask,
    pet_poll: RepeatingTask,
    ambient: RepeatingTask,
    score_sub: Receiver<Vec<ScoreEntry>>,
    rng: SmallRng,
    config: Config,
}

impl GameParts {
    fn attach(self, store: Box<dyn ScoreStore>, local_cache: LocalScoreCache) -> Game {
        Game {
            session: self.session,
            effects: EffectSet::new(),
            config: self.config,
            bonus: BonusRegion::default(),
            rng: self.rng,
            store,
            local_cache,
            leaderboard: Vec::new(),
            score_sub: Some(self.score_sub),
            leaderboard_loaded: false,
            using_local_scores: false,
            show_leaderboard: false,
            has_interacted: false,
            countdown: self.countdown,
            pet_poll: self.pet_poll,
            ambient: self.ambient,
            petting: None,
            clicked_until: None,
            viewport: TargetBounds::new(0.0, 0.0, 80.0, 24.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;
    use crate::leaderboard::{SqliteScoreStore, StoreError};
    use assert_matches::assert_matches;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Store double whose writes always fail and whose subscription never
    /// delivers, simulating an unreachable backend.
    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn insert(&mut self, _entry: &ScoreEntry) -> Result<(), StoreError> {
            Err(StoreError::Database(rusqlite::Error::InvalidQuery))
        }

        fn top(&self, _limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
            Ok(Vec::new())
        }

        fn subscribe(&mut self, _limit: usize) -> mpsc::Receiver<Vec<ScoreEntry>> {
            let (_tx, rx) = mpsc::channel();
            std::mem::forget(_tx);
            rx
        }
    }

    fn quiet_config() -> Config {
        // Randomized decoration off so tests see only what they trigger
        Config {
            ambient_sparkle_chance: 0.0,
            drag_sparkle_chance: 0.0,
            ..Config::default()
        }
    }

    fn game_with(config: Config) -> (Game, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalScoreCache::with_path(dir.path().join("scores.json"));
        let store = Box::new(SqliteScoreStore::in_memory().unwrap());
        let game = Game::new_seeded(config, store, cache, Instant::now(), 7);
        (game, dir)
    }

    fn failing_game(config: Config) -> (Game, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalScoreCache::with_path(dir.path().join("scores.json"));
        let game = Game::new_seeded(config, Box::new(FailingStore), cache, Instant::now(), 7);
        (game, dir)
    }

    fn target() -> TargetBounds {
        TargetBounds::new(0.0, 0.0, 100.0, 100.0)
    }

    /// Walk `advance` in 100ms steps for `ms` total.
    fn run_for(game: &mut Game, start: Instant, ms: u64) -> Instant {
        let mut now = start;
        let mut elapsed = 0;
        while elapsed < ms {
            elapsed += 100;
            now = start + Duration::from_millis(elapsed);
            game.advance(now);
        }
        now
    }

    #[test]
    fn first_click_starts_round_and_scores() {
        let (mut game, _dir) = game_with(quiet_config());
        let now = Instant::now();

        assert_matches!(game.session.phase, Phase::Idle);
        game.register_click(Point::new(10.0, 10.0), target(), now);

        assert_matches!(game.session.phase, Phase::Active);
        assert_eq!(game.session.score, 1);
        assert!(game.has_interacted);
    }

    #[test]
    fn bonus_region_awards_double_with_triple_burst() {
        let (mut game, _dir) = game_with(quiet_config());
        let now = Instant::now();

        // 50%/75% of a 100x100 target is inside the tongue band
        game.register_click(Point::new(50.0, 75.0), target(), now);

        assert_eq!(game.session.score, 2);

        let bumps: Vec<_> = game
            .effects
            .iter()
            .filter_map(|e| match &e.kind {
                EffectKind::ScoreBump { points, bonus } => Some((*points, *bonus)),
                _ => None,
            })
            .collect();
        assert_eq!(bumps, vec![(2, true)]);

        let bursts = game
            .effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::SparkleBurst { .. }))
            .count();
        assert_eq!(bursts, 3);
    }

    #[test]
    fn plain_click_awards_one_with_single_burst() {
        let (mut game, _dir) = game_with(quiet_config());
        let now = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), now);

        assert_eq!(game.session.score, 1);
        let bursts = game
            .effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::SparkleBurst { .. }))
            .count();
        assert_eq!(bursts, 1);
    }

    #[test]
    fn click_flash_suppresses_reentrant_clicks() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        assert!(game.click_flash_active(t0));

        // Within the 150ms flash: swallowed
        game.register_click(Point::new(10.0, 10.0), target(), t0 + Duration::from_millis(100));
        assert_eq!(game.session.score, 1);

        // After the flash clears: scores again
        game.register_click(Point::new(10.0, 10.0), target(), t0 + Duration::from_millis(150));
        assert_eq!(game.session.score, 2);
    }

    #[test]
    fn no_score_after_round_ends() {
        let (mut game, _dir) = game_with(Config {
            round_secs: 1,
            ..quiet_config()
        });
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        run_for(&mut game, t0, 1100);
        assert_matches!(game.session.phase, Phase::Ended);

        let score = game.session.score;
        game.register_click(
            Point::new(10.0, 10.0),
            target(),
            t0 + Duration::from_secs(2),
        );
        assert_eq!(game.session.score, score);
    }

    #[test]
    fn full_round_counts_down_to_ended() {
        let (mut game, _dir) = game_with(Config {
            round_secs: 60,
            ..quiet_config()
        });
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        assert_eq!(game.session.seconds_remaining, 60);

        run_for(&mut game, t0, 59_900);
        assert_matches!(game.session.phase, Phase::Active);
        assert_eq!(game.session.seconds_remaining, 1);

        game.advance(t0 + Duration::from_secs(60));
        assert_matches!(game.session.phase, Phase::Ended);
        assert_eq!(game.session.seconds_remaining, 0);
        assert!(!game.countdown.is_running(), "countdown cancelled at zero");
    }

    #[test]
    fn petting_scores_at_500ms_cadence() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        // Start the round first so the cadence scores from the off
        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);
        let base = game.session.score;

        // Held still for 1200ms: pets land at the 500ms and 1000ms marks
        run_for(&mut game, t0, 1200);
        assert_eq!(game.session.score, base + 2);
    }

    #[test]
    fn petting_tracks_latest_pointer_position() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);

        // Drag onto the bonus region before the first cadence fire
        game.update_petting(Point::new(50.0, 75.0), t0 + Duration::from_millis(200));
        let base = game.session.score;

        run_for(&mut game, t0, 500);
        assert_eq!(game.session.score, base + 2, "pet scored from bonus spot");
    }

    #[test]
    fn end_petting_stops_cadence_and_poll() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);
        let mid = run_for(&mut game, t0, 600);
        let scored = game.session.score;

        game.end_petting();
        assert!(!game.is_petting());
        assert!(!game.pet_poll.is_running(), "poll task cancelled");

        run_for(&mut game, mid, 2000);
        assert_eq!(game.session.score, scored, "no pets after release");
    }

    #[test]
    fn drag_sparkle_roll_honours_forced_probabilities() {
        let (mut game, _dir) = game_with(Config {
            drag_sparkle_chance: 1.0,
            ..quiet_config()
        });
        let t0 = Instant::now();
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);

        let before = game.effects.len();
        game.update_petting(Point::new(12.0, 10.0), t0);
        assert_eq!(game.effects.len(), before + 1, "chance 1.0 always bursts");

        game.config.drag_sparkle_chance = 0.0;
        let before = game.effects.len();
        game.update_petting(Point::new(14.0, 10.0), t0);
        assert_eq!(game.effects.len(), before, "chance 0.0 never bursts");
    }

    #[test]
    fn ambient_sparkles_respect_gating() {
        let (mut game, _dir) = game_with(Config {
            ambient_sparkle_chance: 1.0,
            ..quiet_config()
        });
        let t0 = Instant::now();
        game.set_viewport(TargetBounds::new(0.0, 0.0, 80.0, 24.0));

        // Idle with chance 1.0: a burst per 300ms roll
        game.advance(t0 + Duration::from_millis(300));
        assert!(!game.effects.is_empty());

        // While petting the ambient roll is skipped
        game.effects.clear();
        game.begin_petting(Point::new(10.0, 10.0), target(), t0 + Duration::from_millis(400));
        game.advance(t0 + Duration::from_millis(600));
        let sparkles = game
            .effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::SparkleBurst { .. }))
            .count();
        assert_eq!(sparkles, 0);
    }

    #[test]
    fn ambient_never_scores() {
        let (mut game, _dir) = game_with(Config {
            ambient_sparkle_chance: 1.0,
            ..quiet_config()
        });
        let t0 = Instant::now();
        run_for(&mut game, t0, 3000);
        assert_eq!(game.session.score, 0);
        assert_matches!(game.session.phase, Phase::Idle);
    }

    #[test]
    fn effects_expire_during_advance() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        assert!(!game.effects.is_empty());

        // Sparkle (800ms) and bump (1000ms) both gone after 1s
        run_for(&mut game, t0, 1100);
        assert!(game.effects.is_empty());
    }

    #[test]
    fn submit_blank_names_rejected_but_view_opens() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();
        game.register_click(Point::new(10.0, 10.0), target(), t0);

        game.submit_score("");
        game.submit_score("   ");
        assert!(game.show_leaderboard);

        game.advance(t0 + Duration::from_millis(100));
        assert!(game.leaderboard().is_empty());
        assert_eq!(game.session.player_name, None);
    }

    #[test]
    fn submit_persists_and_shows_entry() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(50.0, 75.0), target(), t0);
        assert_eq!(game.session.score, 2);

        game.submit_score("  Kei  ");
        assert!(game.show_leaderboard);
        assert!(game.leaderboard_loaded);
        assert_eq!(game.session.player_name.as_deref(), Some("Kei"));

        let top = game.leaderboard();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Kei");
        assert_eq!(top[0].score, 2);
    }

    #[test]
    fn submit_truncates_overlong_names() {
        let (mut game, _dir) = game_with(quiet_config());
        game.register_click(Point::new(10.0, 10.0), target(), Instant::now());

        game.submit_score("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(
            game.session.player_name.as_deref(),
            Some("abcdefghijklmnopqrst")
        );
    }

    #[test]
    fn store_failure_falls_back_to_local_list() {
        let (mut game, _dir) = failing_game(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.advance(t0 + Duration::from_millis(100));
        assert!(!game.leaderboard_loaded, "subscription never resolves");

        game.submit_score("Kei");
        assert!(game.using_local_scores);
        assert!(game.leaderboard_loaded);
        let top = game.leaderboard();
        assert_eq!(top.len(), 1);
        assert_eq!((top[0].name.as_str(), top[0].score), ("Kei", 1));
    }

    #[test]
    fn cancel_round_resets_but_keeps_name() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();

        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);
        game.session.player_name = Some("Kei".into());

        game.cancel_round();
        assert_matches!(game.session.phase, Phase::Idle);
        assert_eq!(game.session.score, 0);
        assert_eq!(game.session.seconds_remaining, 60);
        assert_eq!(game.session.player_name.as_deref(), Some("Kei"));
        assert!(!game.countdown.is_running());
        assert!(!game.is_petting());
    }

    #[test]
    fn new_game_also_clears_name_and_leaderboard_view() {
        let (mut game, _dir) = game_with(quiet_config());
        game.register_click(Point::new(10.0, 10.0), target(), Instant::now());
        game.submit_score("Kei");
        assert!(game.show_leaderboard);

        game.new_game();
        assert_matches!(game.session.phase, Phase::Idle);
        assert_eq!(game.session.player_name, None);
        assert!(!game.show_leaderboard);
    }

    #[test]
    fn shutdown_cancels_everything_and_is_idempotent() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();
        game.register_click(Point::new(10.0, 10.0), target(), t0);
        game.begin_petting(Point::new(10.0, 10.0), target(), t0);

        game.shutdown();
        game.shutdown();

        assert!(!game.countdown.is_running());
        assert!(!game.pet_poll.is_running());
        assert!(!game.ambient.is_running());
        assert!(!game.is_petting());
        assert!(game.score_sub.is_none());

        // Advance after teardown fires nothing
        let score = game.session.score;
        run_for(&mut game, t0, 2000);
        assert_eq!(game.session.score, score);
        assert_eq!(game.session.seconds_remaining, 60, "countdown no longer runs");
    }

    #[test]
    fn score_monotone_while_active() {
        let (mut game, _dir) = game_with(quiet_config());
        let t0 = Instant::now();
        game.register_click(Point::new(10.0, 10.0), target(), t0);

        let mut last = 0;
        for i in 1..=20u64 {
            let now = t0 + Duration::from_millis(i * 200);
            game.register_click(Point::new(10.0, 10.0), target(), now);
            game.advance(now);
            assert!(game.session.score >= last);
            last = game.session.score;
        }
    }
}
