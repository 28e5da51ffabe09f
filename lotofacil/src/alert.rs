//! User-defined alerts on the latest draw and on the delays of individual numbers.

use serde::{Deserialize, Serialize};

use crate::draw::{Draw, NUMBERS};
use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    /// The latest draw did (or did not) contain `number`.
    Drawn { number: u8, drawn: bool },

    /// `number` has been absent for at least `min_delay` consecutive draws.
    Delayed { number: u8, min_delay: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub name: String,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertStatus {
    Triggered(String),
    Quiet,
    NoData,
}

impl Condition {
    pub fn number(&self) -> u8 {
        match self {
            Condition::Drawn { number, .. } | Condition::Delayed { number, .. } => *number,
        }
    }
}

impl Alert {
    /// Alerts on numbers outside 1-25 never trigger.
    pub fn evaluate(&self, draws: &[Draw]) -> AlertStatus {
        let Some(latest) = draws.last() else {
            return AlertStatus::NoData;
        };
        if !(1..=NUMBERS).contains(&self.condition.number()) {
            return AlertStatus::Quiet;
        }
        match self.condition {
            Condition::Drawn { number, drawn } => {
                if latest.contains(number) == drawn {
                    let verb = if drawn { "was" } else { "was not" };
                    AlertStatus::Triggered(format!(
                        "{}: {number:02} {verb} drawn in contest {}",
                        self.name, latest.contest
                    ))
                } else {
                    AlertStatus::Quiet
                }
            }
            Condition::Delayed { number, min_delay } => {
                let delay = stats::delays(draws)[number];
                if delay >= min_delay {
                    AlertStatus::Triggered(format!(
                        "{}: {number:02} absent for {delay} draws",
                        self.name
                    ))
                } else {
                    AlertStatus::Quiet
                }
            }
        }
    }
}
