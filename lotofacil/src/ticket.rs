//! Parsing a player's ticket and checking it against a draw.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::draw::{Draw, NUMBERS, PICKS};
use crate::generate::Game;
use crate::pool::Pool;
use crate::scoring::{prize_for, Money};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTicket {
    #[error("'{0}' is not a number")]
    Unparseable(String),

    #[error("number {0} outside 1-25")]
    OutOfRange(u32),

    #[error("number {0} entered twice")]
    Duplicate(u8),

    #[error("expected 15 numbers, got {0}")]
    WrongCount(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ticket(Game);
impl Ticket {
    pub fn game(&self) -> &Game {
        &self.0
    }

    pub fn numbers(&self) -> &[u8; PICKS] {
        self.0.numbers()
    }
}

impl From<Game> for Ticket {
    fn from(game: Game) -> Self {
        Self(game)
    }
}

impl FromStr for Ticket {
    type Err = InvalidTicket;

    /// Accepts numbers separated by commas, whitespace or newlines, in any order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut numbers = Vec::with_capacity(PICKS);
        let mut pool = Pool::EMPTY;
        for token in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            let number = token
                .parse::<u32>()
                .map_err(|_| InvalidTicket::Unparseable(token.to_string()))?;
            if !(1..=NUMBERS as u32).contains(&number) {
                return Err(InvalidTicket::OutOfRange(number));
            }
            let number = number as u8;
            if pool.contains(number) {
                return Err(InvalidTicket::Duplicate(number));
            }
            pool.insert(number);
            numbers.push(number);
        }

        let numbers: [u8; PICKS] = numbers
            .try_into()
            .map_err(|numbers: Vec<u8>| InvalidTicket::WrongCount(numbers.len()))?;
        Ok(Self(Game::from_unsorted(numbers)))
    }
}

/// The outcome of checking a ticket against a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub contest: u32,
    /// The ticket's numbers that were drawn, ascending.
    pub hits: Vec<u8>,
    pub prize: Money,
}
impl Check {
    pub fn is_winner(&self) -> bool {
        self.hits.len() > 10
    }
}

pub fn check(ticket: &Ticket, draw: &Draw) -> Check {
    let hits = (ticket.game().pool() & draw.pool()).to_vec();
    let prize = prize_for(hits.len() as u8);
    Check {
        contest: draw.contest,
        hits,
        prize,
    }
}
