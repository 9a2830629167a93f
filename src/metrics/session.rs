use crate::game::Outcome;

/// Scoreboard for the current process. Nothing here outlives the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMetrics {
    pub high_score: u32,
    pub games_played: u32,
    pub games_won: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the high score as soon as a running game passes it
    pub fn observe_score(&mut self, score: u32) {
        if score > self.high_score {
            self.high_score = score;
        }
    }

    pub fn on_game_over(&mut self, final_score: u32, outcome: Option<Outcome>) {
        self.games_played += 1;
        if outcome == Some(Outcome::BoardFilled) {
            self.games_won += 1;
        }
        self.observe_score(final_score);
    }
}
