//! Utilitários partilhados pelos testes de integração.
#![allow(dead_code)]

use chess_negamax::search::Evaluator;
use chess_negamax::{GameState, Score, INFINITY};

pub mod positions {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    pub const ITALIAN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";
    pub const ROOK_ENDGAME: &str = "8/5pk1/6p1/8/8/6P1/r4PK1/1R6 w - - 0 40";
    pub const KNIGHT_VS_PAWN: &str = "4k3/4p3/8/3N4/8/8/8/4K3 b - - 0 1";
    pub const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    pub const PAWN_DUO: &str = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1";
    pub const PROMOTION_RACE: &str = "8/1P4k1/8/8/8/8/5p2/1K6 w - - 0 1";
}

/// Espelha um FEN: fileiras invertidas, cores trocadas, lado a jogar trocado.
pub fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    assert!(fields.len() >= 4, "short fen {}", fen);

    let board = fields[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let side = if fields[1] == "w" { "b" } else { "w" };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        "KQkq".chars().filter(|c| swapped.contains(*c)).collect()
    };

    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        square => {
            let file = &square[..1];
            let rank = if &square[1..] == "3" { "6" } else { "3" };
            format!("{}{}", file, rank)
        }
    };

    let halfmove = fields.get(4).copied().unwrap_or("0");
    let fullmove = fields.get(5).copied().unwrap_or("1");
    format!("{} {} {} {} {} {}", board, side, castling, en_passant, halfmove, fullmove)
}

fn swap_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

/// Minimax exaustivo (sem poda), ordem natural dos lances e o mesmo desempate
/// da raiz: o primeiro lance com a melhor pontuação. Os nós contam-se como
/// na busca com poda; o total da raiz exclui a própria raiz.
pub fn exhaustive_root<S, E>(state: &mut S, depth: u8, eval: &E) -> (Option<S::Move>, Score, u64)
where
    S: GameState,
    E: Evaluator<S>,
{
    let moves = state.legal_moves();
    if depth == 0 || moves.is_empty() {
        return (None, leaf(state, eval), 1);
    }

    let mut best_move = None;
    let mut best_score = -INFINITY;
    let mut nodes = 0;
    for mv in moves {
        state.push(mv);
        let (score, child_nodes) = exhaustive(state, depth - 1, eval);
        state.pop();
        nodes += child_nodes;
        if best_move.is_none() || -score > best_score {
            best_move = Some(mv);
            best_score = -score;
        }
    }
    (best_move, best_score, nodes)
}

fn exhaustive<S, E>(state: &mut S, depth: u8, eval: &E) -> (Score, u64)
where
    S: GameState,
    E: Evaluator<S>,
{
    if depth == 0 || state.is_insufficient_material() {
        return (leaf(state, eval), 1);
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        return (leaf(state, eval), 1);
    }

    let mut best = -INFINITY;
    let mut nodes = 1;
    for mv in moves {
        state.push(mv);
        let (score, child_nodes) = exhaustive(state, depth - 1, eval);
        state.pop();
        nodes += child_nodes;
        best = best.max(-score);
    }
    (best, nodes)
}

fn leaf<S: GameState, E: Evaluator<S>>(state: &S, eval: &E) -> Score {
    eval.evaluate(state) * state.side_to_move().sign()
}
