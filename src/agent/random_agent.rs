// Agente que joga um lance legal ao acaso. Com semente, a sequência é reproduzível.

use super::{Agent, MoveInfo};
use crate::core::{GameState, Move, Position};
use crate::error::{EngineError, EngineResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};
use tracing::debug;

pub struct RandomAgent {
    seed: Option<u64>,
    rng: Option<StdRng>,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        RandomAgent {
            seed,
            rng: seed.map(StdRng::seed_from_u64),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, position: &mut Position) -> EngineResult<(Move, MoveInfo)> {
        let moves = position.legal_moves();
        let chosen = match self.rng.as_mut() {
            Some(rng) => moves.choose(rng),
            None => moves.choose(&mut thread_rng()),
        };
        let mv = *chosen.ok_or_else(|| EngineError::NoLegalMoves { fen: position.fen() })?;
        debug!(mv = %mv, candidates = moves.len(), "random move");

        Ok((
            mv,
            MoveInfo {
                agent: "random".to_string(),
                seed: self.seed,
                ..MoveInfo::default()
            },
        ))
    }
}
