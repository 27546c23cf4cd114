// Buscas independentes em paralelo: cada worker fica com a sua cópia da posição.

use crate::core::*;
use crate::error::EngineResult;
use crate::search::alpha_beta::{AlphaBeta, SearchResult};
use crate::search::evaluation::Evaluator;
use crate::search::move_ordering::TacticalOrderer;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

pub struct ParallelSearcher {
    threads: usize,
    depth: u8,
    move_ordering: bool,
}

impl ParallelSearcher {
    pub fn new(depth: u8) -> Self {
        Self {
            threads: num_cpus::get().max(1),
            depth,
            move_ordering: true,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.move_ordering = enabled;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Procura cada posição à profundidade configurada. Os resultados vêm
    /// pela mesma ordem das posições e as posições de entrada não mudam.
    pub fn search_all<S, E>(&self, positions: &[S], evaluator: &E) -> EngineResult<Vec<SearchResult<Move>>>
    where
        S: BoardView + Clone + Send + Sync,
        E: Evaluator<S> + Sync + ?Sized,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;

        let start = Instant::now();
        let results: Vec<SearchResult<Move>> = pool.install(|| {
            positions
                .par_iter()
                .map(|position| {
                    let mut state = position.clone();
                    AlphaBeta::new(evaluator, TacticalOrderer)
                        .with_move_ordering(self.move_ordering)
                        .search_root(&mut state, self.depth)
                })
                .collect()
        });

        let nodes: u64 = results.iter().map(|r| r.nodes_searched).sum();
        debug!(
            positions = positions.len(),
            threads = self.threads,
            nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "parallel search finished"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::alpha_beta::search_root;
    use crate::search::evaluation::PositionEvaluator;

    #[test]
    fn test_parallel_matches_sequential() {
        let positions: Vec<Position> = [
            STARTING_FEN,
            "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
            "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        ]
        .iter()
        .map(|fen| Position::from_fen(fen).unwrap())
        .collect();

        let evaluator = PositionEvaluator::with_default_script();
        let parallel = ParallelSearcher::new(2)
            .with_threads(3)
            .search_all(&positions, &evaluator)
            .unwrap();

        assert_eq!(parallel.len(), positions.len());
        for (position, result) in positions.iter().zip(&parallel) {
            let mut state = position.clone();
            assert_eq!(*result, search_root(&mut state, 2, &evaluator, true));
        }
        assert_eq!(parallel[2].best_move, None);
    }

    #[test]
    fn test_zero_threads_means_one() {
        assert_eq!(ParallelSearcher::new(1).with_threads(0).threads(), 1);
    }
}
