use crate::catalog::{unique_name_count, Catalog, CatalogStreet, GeoPoint, Level};
use crate::notify::Notification;
use crate::outcome::{evaluate_choice, evaluate_click};
use crate::random::{self, RandomSource};
use crate::round;
use itertools::Itertools;
use log::{debug, info};
use std::collections::HashMap;

pub const DEFAULT_STREET_COUNT: usize = 10;

/// Polyline weight for untouched vs highlighted streets.
pub const DEFAULT_WEIGHT: u8 = 2;
pub const HIGHLIGHT_WEIGHT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum GameMode {
    Endless,
    Challenge,
    Elimination,
    MultipleChoice,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub level: Level,
    pub mode: GameMode,
    /// Rounds in a challenge game. Ignored by the other modes.
    pub street_count: usize,
    /// Highlight the true target after an incorrect click.
    pub reveal_correct: bool,
}

impl SessionConfig {
    pub fn new(level: Level, mode: GameMode) -> Self {
        Self {
            level,
            mode,
            street_count: DEFAULT_STREET_COUNT,
            reveal_correct: false,
        }
    }
}

/// Color tag for one street name. All segments of a logical street share
/// the tag; untagged streets render in the base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The street a multiple-choice round is asking about.
    Target,
    Correct,
    Incorrect,
    /// Permanently cleared in elimination mode.
    Eliminated,
    /// A previously resolved round.
    Resolved,
}

/// What a click resolved to, carried while the notification is open.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOutcome {
    clicked_name: String,
    correct: bool,
}

/// The session's single state machine. `AwaitingOutcome` is the only
/// guard: no click is processed and no second dismissal is honored while
/// a round's notification is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Playing,
    AwaitingOutcome(PendingOutcome),
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStats {
    pub total_streets: usize,
    pub correct_guesses: u32,
    pub percent_correct: f64,
}

/// Which base tiles the map should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayer {
    Labeled,
    Unlabeled,
}

/// Per-street render state handed to the map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetOverlay<'a> {
    pub unique_id: &'a str,
    pub name: &'a str,
    pub path: &'a [GeoPoint],
    pub highlight: Option<Highlight>,
    pub weight: u8,
}

/// One playthrough: owns the score, pools, color map, and phase, and
/// drives every transition from player events.
pub struct GameSession {
    config: SessionConfig,
    filtered: Vec<CatalogStreet>,
    unique_names: usize,
    remaining: Vec<CatalogStreet>,
    current: Option<CatalogStreet>,
    options: Vec<String>,
    selected_option: Option<String>,
    colors: HashMap<String, Highlight>,
    marker: Option<GeoPoint>,
    show_labels: bool,
    score: u32,
    phase: Phase,
    stats: Option<GameStats>,
    rng: Box<dyn RandomSource>,
}

impl GameSession {
    pub fn new(config: SessionConfig, catalog: &Catalog, rng: Box<dyn RandomSource>) -> Self {
        let filtered = catalog.filter_by_level(config.level);
        let unique_names = unique_name_count(&filtered);

        let mut session = Self {
            config,
            filtered,
            unique_names,
            remaining: Vec::new(),
            current: None,
            options: Vec::new(),
            selected_option: None,
            colors: HashMap::new(),
            marker: None,
            show_labels: false,
            score: 0,
            phase: Phase::Playing,
            stats: None,
            rng,
        };
        session.initialize();
        session
    }

    /// (Re)build the playthrough state in one step: score, colors, pools,
    /// and the first round. Also the "Play Again" transition.
    fn initialize(&mut self) {
        self.score = 0;
        self.stats = None;
        self.colors.clear();
        self.marker = None;
        self.options.clear();
        self.selected_option = None;
        self.current = None;
        self.phase = Phase::Playing;

        match self.config.mode {
            GameMode::Endless => {
                self.remaining = self.filtered.clone();
                self.next_target();
            }
            GameMode::Challenge => {
                let mut shuffled = self.filtered.clone();
                random::shuffle(self.rng.as_mut(), &mut shuffled);
                self.remaining = shuffled
                    .into_iter()
                    .unique_by(|s| s.name_key())
                    .take(self.config.street_count)
                    .collect();
                self.next_target();
            }
            GameMode::Elimination => {
                self.remaining = self
                    .filtered
                    .iter()
                    .unique_by(|s| s.name_key())
                    .cloned()
                    .collect();
                self.next_target();
            }
            GameMode::MultipleChoice => {
                self.remaining = self.filtered.clone();
                self.next_choice_round();
            }
        }
        debug!(
            "session initialized: level={} mode={} pool={} remaining={}",
            self.config.level,
            self.config.mode,
            self.filtered.len(),
            self.remaining.len()
        );
    }

    pub fn play_again(&mut self) {
        self.initialize();
    }

    fn next_target(&mut self) {
        match round::pick_target(&self.remaining, self.rng.as_mut()) {
            Some(street) => self.current = Some(street.clone()),
            None => self.end_game(),
        }
    }

    /// Multiple choice always resamples from the full filtered pool and
    /// highlights the new target: the glowing polyline is the question.
    fn next_choice_round(&mut self) {
        match round::multiple_choice_round(&self.filtered, self.rng.as_mut()) {
            Some(choice) => {
                self.colors
                    .insert(choice.street.name.clone(), Highlight::Target);
                self.current = Some(choice.street);
                self.options = choice.options;
                self.selected_option = None;
            }
            None => self.end_game(),
        }
    }

    fn end_game(&mut self) {
        let total_streets = match self.config.mode {
            GameMode::Challenge => self.config.street_count,
            _ => self.unique_names,
        };
        let percent_correct = if total_streets == 0 {
            0.0
        } else {
            let raw = self.score as f64 / total_streets as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };
        self.stats = Some(GameStats {
            total_streets,
            correct_guesses: self.score,
            percent_correct,
        });
        self.current = None;
        self.phase = Phase::GameOver;
        info!(
            "game over: {}/{} correct ({percent_correct}%)",
            self.score, total_streets
        );
    }

    /// Resolve a map click. Returns the notification to display, or
    /// `None` when the click must be ignored: a notification is still
    /// open, the game is over, the mode is multiple choice, or the event
    /// is stale (no current target after a reset).
    pub fn handle_click(&mut self, point: GeoPoint) -> Option<Notification> {
        if self.config.mode == GameMode::MultipleChoice {
            return None;
        }
        if self.phase != Phase::Playing {
            return None;
        }
        let target = self.current.clone()?;

        self.marker = Some(point);
        let eval = evaluate_click(&point, &self.filtered, &target);
        debug!(
            "click: nearest={} target={} correct={}",
            eval.clicked_name, target.name, eval.is_correct
        );

        let notification = if eval.is_correct {
            self.score += 1;
            self.colors
                .insert(eval.clicked_name.clone(), Highlight::Correct);
            Notification::click_correct(&target.name)
        } else {
            self.colors
                .insert(eval.clicked_name.clone(), Highlight::Incorrect);
            if self.config.reveal_correct {
                self.colors.insert(target.name.clone(), Highlight::Correct);
            }
            Notification::click_incorrect(&eval.clicked_name, self.config.reveal_correct)
        };

        self.phase = Phase::AwaitingOutcome(PendingOutcome {
            clicked_name: eval.clicked_name,
            correct: eval.is_correct,
        });
        Some(notification)
    }

    /// The notification-dismissed callback. Guarded: a second call (or a
    /// call with no round open) is a no-op. Applies the mode's pool
    /// transition and starts the next round or ends the game.
    pub fn acknowledge(&mut self) {
        let pending = match &self.phase {
            Phase::AwaitingOutcome(pending) => pending.clone(),
            _ => return,
        };
        let target = match self.current.clone() {
            Some(target) => target,
            None => {
                self.phase = Phase::Playing;
                return;
            }
        };

        self.phase = Phase::Playing;
        self.colors
            .insert(pending.clicked_name.clone(), Highlight::Resolved);

        if pending.correct {
            match self.config.mode {
                GameMode::Elimination => {
                    self.remove_from_remaining(&target);
                    self.colors
                        .insert(target.name.clone(), Highlight::Eliminated);
                    self.advance_or_end();
                }
                GameMode::Challenge => {
                    self.colors.insert(target.name.clone(), Highlight::Resolved);
                    self.remove_from_remaining(&target);
                    self.advance_or_end();
                }
                GameMode::Endless => {
                    self.colors.insert(target.name.clone(), Highlight::Resolved);
                    self.next_target();
                }
                GameMode::MultipleChoice => {}
            }
        } else {
            self.colors.insert(target.name.clone(), Highlight::Resolved);
            if self.config.mode == GameMode::Challenge {
                // A wrong guess still spends the round in challenge mode.
                self.remove_from_remaining(&target);
                self.advance_or_end();
            }
            // Other modes retry the same target.
        }
    }

    fn remove_from_remaining(&mut self, target: &CatalogStreet) {
        self.remaining
            .retain(|s| !s.name.eq_ignore_ascii_case(&target.name));
    }

    fn advance_or_end(&mut self) {
        if self.remaining.is_empty() {
            self.end_game();
        } else {
            self.next_target();
        }
    }

    /// Stage a multiple-choice answer. Unknown options are ignored.
    pub fn select_option(&mut self, option: &str) {
        if self.config.mode != GameMode::MultipleChoice || self.phase != Phase::Playing {
            return;
        }
        if self.options.iter().any(|o| o == option) {
            self.selected_option = Some(option.to_string());
        }
    }

    /// Submit the staged answer. Synchronous: scores, rolls the next
    /// round from the full pool, and clears the selection. Returns `None`
    /// with nothing staged (the submit button is disabled then).
    pub fn submit_choice(&mut self) -> Option<Notification> {
        if self.config.mode != GameMode::MultipleChoice || self.phase != Phase::Playing {
            return None;
        }
        let selected = self.selected_option.clone()?;
        let target = self.current.clone()?;

        let correct = evaluate_choice(&selected, &target);
        let notification = if correct {
            self.score += 1;
            Notification::choice_correct(&target.name)
        } else {
            Notification::choice_incorrect(&target.name)
        };

        self.colors.insert(target.name.clone(), Highlight::Resolved);
        self.next_choice_round();
        Some(notification)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_awaiting_outcome(&self) -> bool {
        matches!(self.phase, Phase::AwaitingOutcome(_))
    }

    pub fn current_street(&self) -> Option<&CatalogStreet> {
        self.current.as_ref()
    }

    pub fn target_name(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.name.as_str())
    }

    /// Everything the map should draw for this level.
    pub fn streets(&self) -> &[CatalogStreet] {
        &self.filtered
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn unique_street_count(&self) -> usize {
        self.unique_names
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn final_stats(&self) -> Option<&GameStats> {
        self.stats.as_ref()
    }

    pub fn marker(&self) -> Option<GeoPoint> {
        self.marker
    }

    pub fn highlight_for(&self, name: &str) -> Option<Highlight> {
        self.colors.get(name).copied()
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn tile_layer(&self) -> TileLayer {
        if self.show_labels {
            TileLayer::Labeled
        } else {
            TileLayer::Unlabeled
        }
    }

    pub fn set_reveal_correct(&mut self, reveal: bool) {
        self.config.reveal_correct = reveal;
    }

    pub fn overlays(&self) -> Vec<StreetOverlay<'_>> {
        self.filtered
            .iter()
            .map(|street| {
                let highlight = self.colors.get(&street.name).copied();
                StreetOverlay {
                    unique_id: &street.unique_id,
                    name: &street.name,
                    path: &street.path,
                    highlight,
                    weight: if highlight.is_some() {
                        HIGHLIGHT_WEIGHT
                    } else {
                        DEFAULT_WEIGHT
                    },
                }
            })
            .collect()
    }
}
