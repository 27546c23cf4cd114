// Ficheiro: src/search/alpha_beta.rs
// Descrição: Negamax com poda alpha-beta sobre um único estado mutável
// (push/pop), e o driver da raiz que escolhe o lance.

use crate::core::*;
use crate::search::evaluation::Evaluator;
use crate::search::move_ordering::{MoveOrderer, TacticalOrderer};
use tracing::{debug, trace};

/// Resultado da busca Alpha-Beta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// `None` se a raiz não foi expandida (profundidade 0 ou sem lances).
    pub best_move: Option<M>,
    /// Do ponto de vista de quem joga na raiz.
    pub score: Score,
    pub depth: u8,
    pub nodes_searched: u64,
}

/// Motor negamax. Não guarda estado entre buscas: pode ser partilhado
/// entre threads desde que cada uma tenha a sua própria posição.
pub struct AlphaBeta<'e, E: ?Sized, O> {
    evaluator: &'e E,
    orderer: O,
    move_ordering: bool,
}

impl<'e, E: ?Sized, O> AlphaBeta<'e, E, O> {
    pub fn new(evaluator: &'e E, orderer: O) -> Self {
        Self {
            evaluator,
            orderer,
            move_ordering: true,
        }
    }

    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.move_ordering = enabled;
        self
    }

    /// Avaliação estática convertida para o ponto de vista de quem joga.
    #[inline(always)]
    fn leaf_score<S>(&self, state: &S) -> Score
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.evaluator.evaluate(state) * state.side_to_move().sign()
    }

    fn ordered_moves<S>(&self, state: &S) -> Vec<S::Move>
    where
        S: GameState,
        O: MoveOrderer<S>,
    {
        let mut moves = state.legal_moves();
        if self.move_ordering {
            self.orderer.order_moves(state, &mut moves);
        }
        moves
    }

    /// Negamax fail-soft. Devolve (pontuação para quem joga, nós visitados).
    /// O estado volta exatamente ao que era à entrada.
    pub fn search<S>(&self, state: &mut S, depth: u8, mut alpha: Score, beta: Score) -> (Score, u64)
    where
        S: GameState,
        E: Evaluator<S>,
        O: MoveOrderer<S>,
    {
        if depth == 0 || state.is_insufficient_material() {
            return (self.leaf_score(state), 1);
        }

        let moves = self.ordered_moves(state);
        if moves.is_empty() {
            // Mate ou afogamento: o avaliador trata do caso terminal
            return (self.leaf_score(state), 1);
        }

        let mut best_score = -INFINITY;
        let mut nodes = 1u64;

        for mv in moves {
            state.push(mv);
            let (child_score, child_nodes) = self.search(state, depth - 1, -beta, -alpha);
            state.pop();

            let score = -child_score;
            nodes += child_nodes;

            if score > best_score {
                best_score = score;
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break; // Alpha-beta cutoff
            }
        }

        (best_score, nodes)
    }

    /// Escolhe o lance na raiz. Em caso de empate fica o primeiro lance
    /// (na ordem de busca) com a melhor pontuação.
    pub fn search_root<S>(&self, state: &mut S, depth: u8) -> SearchResult<S::Move>
    where
        S: GameState,
        E: Evaluator<S>,
        O: MoveOrderer<S>,
    {
        let moves = if depth == 0 {
            Vec::new()
        } else {
            self.ordered_moves(state)
        };

        if moves.is_empty() {
            let score = self.leaf_score(state);
            debug!(depth, score, "root not expanded");
            return SearchResult {
                best_move: None,
                score,
                depth,
                nodes_searched: 1,
            };
        }

        let beta = INFINITY;
        let mut alpha = -INFINITY;
        let mut best_move = None;
        let mut best_score = -INFINITY;
        let mut nodes = 0u64;

        for mv in moves {
            state.push(mv);
            let (child_score, child_nodes) = self.search(state, depth - 1, -beta, -alpha);
            state.pop();

            let score = -child_score;
            nodes += child_nodes;
            trace!(?mv, score, child_nodes, "root move");

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        }

        debug!(depth, score = best_score, nodes, "search finished");

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes_searched: nodes,
        }
    }
}

/// Ponto de entrada para a orquestração: ordenação tática opcional.
pub fn search_root<S, E>(state: &mut S, depth: u8, eval_fn: &E, ordering_enabled: bool) -> SearchResult<Move>
where
    S: BoardView,
    E: Evaluator<S> + ?Sized,
{
    AlphaBeta::new(eval_fn, TacticalOrderer)
        .with_move_ordering(ordering_enabled)
        .search_root(state, depth)
}
