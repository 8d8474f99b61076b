use crate::state::{MatchRecord, MatchStatus};

/// Won/lost/drawn tally for a team's recent matches. Derived from the current
/// detail model; never stored or updated independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub won: usize,
    pub lost: usize,
    pub drawn: usize,
}

impl MatchStats {
    pub fn total(&self) -> usize {
        self.won + self.lost + self.drawn
    }
}

/// Single-pass tally over the match sequence. Total over any input (empty
/// included) and independent of match order.
pub fn aggregate(matches: &[MatchRecord]) -> MatchStats {
    let mut stats = MatchStats::default();
    for record in matches {
        match record.match_status {
            MatchStatus::Won => stats.won += 1,
            MatchStatus::Lost => stats.lost += 1,
            MatchStatus::Drawn => stats.drawn += 1,
        }
    }
    stats
}
