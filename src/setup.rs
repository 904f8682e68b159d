use crate::catalog::{Catalog, Level};
use crate::random::RandomSource;
use crate::session::{GameMode, GameSession, SessionConfig, DEFAULT_STREET_COUNT};

/// Round counts offered by the challenge-mode selector.
pub const STREET_COUNT_CHOICES: [usize; 3] = [10, 20, 50];

/// The pre-game flow behind the two selection screens. A session exists
/// only once both level and mode are chosen; `clear` is the
/// "Change Level/Mode" button and drops back to the first screen.
#[derive(Debug, Clone)]
pub struct GameSetup {
    level: Option<Level>,
    mode: Option<GameMode>,
    street_count: usize,
    reveal_correct: bool,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSetup {
    pub fn new() -> Self {
        Self {
            level: None,
            mode: None,
            street_count: DEFAULT_STREET_COUNT,
            reveal_correct: false,
        }
    }

    pub fn choose_level(&mut self, level: Level) {
        self.level = Some(level);
    }

    pub fn choose_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
    }

    /// Only the offered counts are accepted; anything else is ignored.
    pub fn choose_street_count(&mut self, count: usize) {
        if STREET_COUNT_CHOICES.contains(&count) {
            self.street_count = count;
        }
    }

    pub fn set_reveal_correct(&mut self, reveal: bool) {
        self.reveal_correct = reveal;
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn street_count(&self) -> usize {
        self.street_count
    }

    pub fn config(&self) -> Option<SessionConfig> {
        Some(SessionConfig {
            level: self.level?,
            mode: self.mode?,
            street_count: self.street_count,
            reveal_correct: self.reveal_correct,
        })
    }

    /// Build the session once both choices are in.
    pub fn start(&self, catalog: &Catalog, rng: Box<dyn RandomSource>) -> Option<GameSession> {
        let config = self.config()?;
        Some(GameSession::new(config, catalog, rng))
    }

    /// Back to level selection; the caller drops its session.
    pub fn clear(&mut self) {
        self.level = None;
        self.mode = None;
    }
}
