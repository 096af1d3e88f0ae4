//! Score records, end-of-game ranking and outcome messages.

use serde::{Deserialize, Serialize};

use crate::core::{Millis, PlayerId, PlayerMap};

/// Result of a single-player session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleResult {
    /// Raw elapsed milliseconds.
    pub elapsed_ms: Millis,
    /// Elapsed time formatted `M:ss`.
    pub time: String,
    pub tries: u32,
}

/// Live score of one player in a multi-player session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub matches: u32,
    pub tries: u32,
    pub is_active: bool,
}

impl PlayerScore {
    /// The `"matches / tries"` string shown on the scoreboard.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{} / {}", self.matches, self.tries)
    }
}

/// One row of the live multi-player scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// 1-based player number.
    pub player: u16,
    pub matches: u32,
    pub tries: u32,
    pub score: String,
    pub active: bool,
}

/// One row of the final multi-player ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    /// 1-based player number.
    pub player: u16,
    pub matches: u32,
    pub tries: u32,
    pub score: String,
    pub is_winner: bool,
}

/// Rank players: most matches first, then fewest tries.
///
/// Every player whose formatted score equals the leader's is a winner, so a
/// genuine tie produces several winners. Equal scores keep seating order.
#[must_use]
pub fn rank_scores(scores: &PlayerMap<PlayerScore>) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = scores
        .iter()
        .map(|(player, score)| RankedScore {
            player: player.number(),
            matches: score.matches,
            tries: score.tries,
            score: score.formatted(),
            is_winner: false,
        })
        .collect();

    ranked.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.tries.cmp(&b.tries)));

    if let Some(best) = ranked.first().map(|r| r.score.clone()) {
        for row in &mut ranked {
            row.is_winner = row.score == best;
        }
    }
    ranked
}

/// What the `game-over` command receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Single(SingleResult),
    Multi(Vec<RankedScore>),
}

impl GameOutcome {
    /// 1-based numbers of the winning players. Empty for single-player games.
    #[must_use]
    pub fn winners(&self) -> Vec<u16> {
        match self {
            GameOutcome::Single(_) => Vec::new(),
            GameOutcome::Multi(ranked) => ranked
                .iter()
                .filter(|r| r.is_winner)
                .map(|r| r.player)
                .collect(),
        }
    }

    /// Was the winner of a multi-player game a specific player?
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners().contains(&player.number())
    }

    /// One-line summary for the game-over screen.
    ///
    /// ```
    /// use memo_grid::session::{GameOutcome, SingleResult};
    ///
    /// let outcome = GameOutcome::Single(SingleResult {
    ///     elapsed_ms: 75_000,
    ///     time: "1:15".to_string(),
    ///     tries: 12,
    /// });
    /// assert_eq!(outcome.headline(), "Your time: 1:15, tries: 12");
    /// ```
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            GameOutcome::Single(result) => {
                format!("Your time: {}, tries: {}", result.time, result.tries)
            }
            GameOutcome::Multi(ranked) => {
                let winners = self.winners();
                match winners.as_slice() {
                    [] => String::new(),
                    [only] => format!("Player {only} wins"),
                    _ if winners.len() == ranked.len() => "It's a draw!".to_string(),
                    [init @ .., last] => {
                        let init: Vec<String> = init.iter().map(u16::to_string).collect();
                        format!("Players {} and {last} win", init.join(", "))
                    }
                }
            }
        }
    }
}

/// Live snapshot pushed to presentation callbacks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionSnapshot {
    Single(SingleResult),
    Multi(Vec<PlayerStanding>),
}
