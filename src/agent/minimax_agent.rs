// Ficheiro: src/agent/minimax_agent.rs
// Descrição: Agente de busca negamax com profundidade fixa.

use super::{Agent, MoveInfo, SearchSettings};
use crate::core::{Move, Position};
use crate::error::{EngineError, EngineResult};
use crate::search::{AlphaBeta, PositionEvaluator, TacticalOrderer};
use std::time::Instant;
use tracing::info;

pub struct MinimaxAgent {
    name: String,
    settings: SearchSettings,
    evaluator: PositionEvaluator,
}

impl MinimaxAgent {
    pub fn new(settings: SearchSettings) -> Self {
        let evaluator = if settings.advanced_eval {
            PositionEvaluator::with_default_script()
        } else {
            PositionEvaluator::basic()
        };
        Self::with_evaluator(settings, evaluator)
    }

    /// Agente com um avaliador próprio (guião personalizado, por exemplo).
    pub fn with_evaluator(settings: SearchSettings, evaluator: PositionEvaluator) -> Self {
        MinimaxAgent {
            name: format!("minimax_d{}", settings.depth),
            settings,
            evaluator,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, position: &mut Position) -> EngineResult<(Move, MoveInfo)> {
        // Tempo medido à volta da busca inteira; a busca não é interrompível
        let start = Instant::now();
        let result = AlphaBeta::new(&self.evaluator, TacticalOrderer)
            .with_move_ordering(self.settings.move_ordering)
            .search_root(position, self.settings.depth);
        let time_ms = start.elapsed().as_millis() as u64;

        let best_move = result
            .best_move
            .ok_or_else(|| EngineError::NoLegalMoves { fen: position.fen() })?;

        let scripted = self
            .evaluator
            .script()
            .is_some_and(|script| script.is_scripted_score(result.score));
        if scripted {
            info!(score = result.score, mv = %best_move, "opening script is driving the move choice");
        }
        info!(
            agent = %self.name,
            mv = %best_move,
            score = result.score,
            nodes = result.nodes_searched,
            time_ms,
            "move chosen"
        );

        Ok((
            best_move,
            MoveInfo {
                agent: "minimax".to_string(),
                depth: Some(result.depth),
                score: Some(result.score),
                nodes: Some(result.nodes_searched),
                time_ms: Some(time_ms),
                seed: None,
                scripted,
            },
        ))
    }
}
