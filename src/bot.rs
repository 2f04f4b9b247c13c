//! # Computer Opponents
//!
//! Simple opponents behind a small trait. `Greedy` is the shipped default:
//! it takes the legal placement with the largest piece, no lookahead.
//! `Random` picks uniformly from the legal moves with a seeded generator,
//! useful as a sparring partner and in tests. A `None` choice means the
//! opponent has no legal move and the caller should pass on its behalf.

use crate::game::GameState;
use crate::search::{self, Candidate};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

pub trait Opponent {
    fn name(&self) -> &'static str;
    /// Chooses a move for `player`, or None when blocked.
    fn choose_move(&mut self, state: &GameState, player: usize) -> Option<Candidate>;
}

/// Maximize placed area, first-found on ties.
#[derive(Debug, Default)]
pub struct Greedy;

impl Opponent for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_move(&mut self, state: &GameState, player: usize) -> Option<Candidate> {
        search::best_move(state, player)
    }
}

/// Uniform choice over the legal moves, deterministic per seed.
#[derive(Debug)]
pub struct Random {
    rng: Xoshiro256PlusPlus,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Opponent for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, state: &GameState, player: usize) -> Option<Candidate> {
        let mut moves = search::legal_moves(state, player);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..moves.len());
        Some(moves.swap_remove(idx))
    }
}
