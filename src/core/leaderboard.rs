use crate::core::aggregate::{Scored, Trend};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::Gold),
            1 => Some(Self::Silver),
            2 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Standing<S> {
    pub rank: usize,
    pub user: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    pub winner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    pub summary: S,
}

impl<S> Standing<S> {
    /// User column as shown on the board: icon, name, and a crown for the winner.
    pub fn display_name(&self) -> String {
        let mut name = if self.icon.is_empty() {
            self.user.clone()
        } else {
            format!("{} {}", self.icon, self.user)
        };
        if self.winner {
            name.push_str(" 👑");
        }
        name
    }
}

/// One user's row before ranking.
#[derive(Debug, Clone)]
pub struct Contender<S> {
    pub user: String,
    pub icon: String,
    pub summary: S,
}

/// Orders contenders by score, highest first. Ties keep their input order.
pub fn rank<S: Scored>(contenders: Vec<Contender<S>>) -> Vec<Standing<S>> {
    let mut contenders = contenders;
    // Vec::sort_by is stable
    contenders.sort_by(|a, b| b.summary.score().total_cmp(&a.summary.score()));

    contenders
        .into_iter()
        .enumerate()
        .map(|(rank, contender)| Standing {
            rank,
            medal: Medal::for_rank(rank),
            winner: rank == 0,
            trend: contender.summary.trend(),
            user: contender.user,
            icon: contender.icon,
            summary: contender.summary,
        })
        .collect()
}
