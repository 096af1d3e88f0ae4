//! Multi-player session: turn rotation and per-player scores.

use tracing::{debug, trace};

use crate::core::{MemoError, PlayerId, PlayerMap, Result};

use super::score::{rank_scores, GameOutcome, PlayerScore, PlayerStanding, SessionSnapshot};
use super::{Presenter, SessionConfig, SessionController};

/// Registry name of the multi-player controller.
pub const MULTI_CONTROLLER: &str = "multi";

/// Fewest players a multi-player session accepts.
pub const MIN_PLAYERS: usize = 2;
/// Most players a multi-player session accepts.
pub const MAX_PLAYERS: usize = 255;

/// Same-screen multi-player scoring.
///
/// The active player keeps the turn after a match and passes it to the next
/// player after a miss.
pub struct MultiPlayerController {
    players: usize,
    active: PlayerId,
    scores: PlayerMap<PlayerScore>,
    presenter: Option<Presenter>,
}

impl MultiPlayerController {
    /// Create a controller for two players.
    pub fn new() -> Self {
        Self {
            players: MIN_PLAYERS,
            active: PlayerId::new(0),
            scores: Self::fresh_scores(MIN_PLAYERS),
            presenter: None,
        }
    }

    /// Bind the presentation callback (builder pattern).
    #[must_use]
    pub fn with_presenter(mut self, presenter: impl FnMut(&SessionSnapshot) + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Bind or replace the presentation callback.
    pub fn set_presenter(&mut self, presenter: impl FnMut(&SessionSnapshot) + 'static) {
        self.presenter = Some(Box::new(presenter));
    }

    /// Start over, optionally with a new player count.
    ///
    /// Fails with `InvalidPlayerCount` (and changes nothing) if the count is
    /// outside `2..=255`.
    pub fn reset_with(&mut self, players: Option<usize>) -> Result<()> {
        let players = players.unwrap_or(self.players);
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(MemoError::InvalidPlayerCount(players));
        }

        self.players = players;
        self.active = PlayerId::new(0);
        self.scores = Self::fresh_scores(players);
        self.render();
        Ok(())
    }

    /// Record a try for the active player.
    ///
    /// A miss passes the turn on; a match scores and keeps it.
    pub fn record_try(&mut self, is_fail: bool) {
        let active = self.active;
        let score = &mut self.scores[active];
        score.tries += 1;

        if is_fail {
            score.is_active = false;
            self.active = active.next(self.players);
            self.scores[self.active].is_active = true;
            trace!(from = %active, to = %self.active, "turn passed");
        } else {
            score.matches += 1;
            trace!(player = %active, matches = score.matches, "player scored");
        }

        self.render();
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Live scores in seating order.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<PlayerScore> {
        &self.scores
    }

    /// Live scoreboard rows.
    #[must_use]
    pub fn standings(&self) -> Vec<PlayerStanding> {
        self.scores
            .iter()
            .map(|(player, score)| PlayerStanding {
                player: player.number(),
                matches: score.matches,
                tries: score.tries,
                score: score.formatted(),
                active: player == self.active,
            })
            .collect()
    }

    fn fresh_scores(players: usize) -> PlayerMap<PlayerScore> {
        PlayerMap::new(players, |player| PlayerScore {
            is_active: player.index() == 0,
            ..PlayerScore::default()
        })
    }

    fn render(&mut self) {
        if self.presenter.is_none() {
            return;
        }
        let snapshot = SessionSnapshot::Multi(self.standings());
        if let Some(presenter) = self.presenter.as_mut() {
            presenter(&snapshot);
        }
    }
}

impl Default for MultiPlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController for MultiPlayerController {
    fn name(&self) -> &str {
        MULTI_CONTROLLER
    }

    fn players(&self) -> usize {
        self.players
    }

    fn activate(&mut self, config: &SessionConfig) -> Result<()> {
        self.reset_with(config.players)
    }

    fn on_start(&mut self) {}

    fn on_try(&mut self) {
        self.record_try(true);
    }

    fn on_match(&mut self) {
        self.record_try(false);
    }

    fn on_end(&mut self) -> GameOutcome {
        let ranked = rank_scores(&self.scores);
        debug!(players = self.players, winner = ?ranked.first().map(|r| r.player), "multi-player game over");
        GameOutcome::Multi(ranked)
    }

    fn on_reset(&mut self) {
        self.active = PlayerId::new(0);
        self.scores = Self::fresh_scores(self.players);
        self.render();
    }

    fn result(&self) -> SessionSnapshot {
        SessionSnapshot::Multi(self.standings())
    }
}

impl std::fmt::Debug for MultiPlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiPlayerController")
            .field("players", &self.players)
            .field("active", &self.active)
            .field("scores", &self.scores)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_players() -> MultiPlayerController {
        let mut multi = MultiPlayerController::new();
        multi.activate(&SessionConfig::players(3)).unwrap();
        multi
    }

    #[test]
    fn test_activate_builds_scores() {
        let multi = three_players();

        assert_eq!(multi.players(), 3);
        assert_eq!(multi.active_player(), PlayerId::new(0));
        let active: Vec<_> = multi.scores().values().map(|s| s.is_active).collect();
        assert_eq!(active, vec![true, false, false]);
    }

    #[test]
    fn test_rotation_fail_fail_match_fail() {
        let mut multi = three_players();
        let mut seen = vec![multi.active_player().index()];

        multi.on_try();
        seen.push(multi.active_player().index());
        multi.on_try();
        seen.push(multi.active_player().index());
        multi.on_match();
        seen.push(multi.active_player().index());
        multi.on_try();
        seen.push(multi.active_player().index());

        assert_eq!(seen, vec![0, 1, 2, 2, 0]);
    }

    #[test]
    fn test_exactly_one_active() {
        let mut multi = three_players();
        for _ in 0..7 {
            multi.on_try();
            let active = multi.scores().values().filter(|s| s.is_active).count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn test_match_scores_for_active_player() {
        let mut multi = three_players();

        multi.on_try();
        multi.on_match();

        let p1 = multi.scores()[PlayerId::new(0)];
        let p2 = multi.scores()[PlayerId::new(1)];
        assert_eq!((p1.matches, p1.tries), (0, 1));
        assert_eq!((p2.matches, p2.tries), (1, 1));
    }

    #[test]
    fn test_reset_keeps_player_count() {
        let mut multi = three_players();
        multi.on_try();
        multi.on_reset();

        assert_eq!(multi.players(), 3);
        assert_eq!(multi.active_player(), PlayerId::new(0));
        assert!(multi.scores().values().all(|s| s.tries == 0));
    }

    #[test]
    fn test_too_few_players_rejected() {
        let mut multi = three_players();

        assert_eq!(
            multi.activate(&SessionConfig::players(1)),
            Err(MemoError::InvalidPlayerCount(1))
        );
        assert_eq!(multi.players(), 3);
    }

    #[test]
    fn test_live_result_has_active_flag() {
        let mut multi = three_players();
        multi.on_try();

        let SessionSnapshot::Multi(rows) = multi.result() else {
            panic!("expected multi snapshot");
        };
        let active: Vec<_> = rows.iter().map(|r| r.active).collect();
        assert_eq!(active, vec![false, true, false]);
        assert_eq!(rows[0].score, "0 / 1");
    }

    #[test]
    fn test_end_ranks() {
        let mut multi = MultiPlayerController::new();
        multi.activate(&SessionConfig::players(2)).unwrap();

        multi.on_match();
        multi.on_try();
        multi.on_try();

        let GameOutcome::Multi(ranked) = multi.on_end() else {
            panic!("expected multi outcome");
        };
        assert_eq!(ranked[0].player, 1);
        assert!(ranked[0].is_winner);
        assert!(!ranked[1].is_winner);
    }

    #[test]
    fn test_presenter_called_on_every_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let mut multi = MultiPlayerController::new().with_presenter(move |_| *sink.borrow_mut() += 1);

        multi.activate(&SessionConfig::players(2)).unwrap();
        multi.on_try();
        multi.on_match();
        multi.on_reset();

        assert_eq!(*count.borrow(), 4);
    }
}
