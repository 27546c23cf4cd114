// Ficheiro: src/core/position.rs
// Descrição: Posição concreta que implementa o contrato de regras sobre o crate `chess`.
// O crate trata da geração de lances legais; aqui ficam os contadores de lances,
// a pilha de undo, o material insuficiente e o FEN completo.

use super::rules::*;
use super::types::*;
use crate::error::{EngineError, EngineResult};
use chess::{Board, BoardStatus, ChessMove, MoveGen, ALL_SQUARES, EMPTY};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Casas claras (b1, d1, ..., a8, c8, ...)
const LIGHT_SQUARES: u64 = 0x55AA55AA55AA55AA;

/// Estado guardado antes de cada lance para o undo exato.
#[derive(Clone, Copy, PartialEq, Eq)]
struct UndoInfo {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// Resultado do jogo do ponto de vista do tabuleiro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
    Ongoing,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOutcome::WhiteWins => "white_win",
            GameOutcome::BlackWins => "black_win",
            GameOutcome::Draw => "draw",
            GameOutcome::Ongoing => "ongoing",
        };
        f.write_str(text)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<UndoInfo>,
}

impl Position {
    /// Posição inicial padrão.
    pub fn new() -> Self {
        Position {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Cria uma posição a partir de uma string FEN. Os contadores de lances
    /// são opcionais (por omissão `0 1`).
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let invalid = |reason: String| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(invalid("Wrong number of parts".to_string()));
        }

        // O crate lê só os quatro primeiros campos
        let placement = format!("{} 0 1", parts[..4].join(" "));
        let board = Board::from_str(&placement).map_err(|e| invalid(e.to_string()))?;

        let halfmove_clock = match parts.get(4) {
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| invalid(format!("Invalid halfmove clock: {}", text)))?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(text) => match text.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(invalid(format!("Invalid fullmove number: {}", text))),
            },
            None => 1,
        };

        Ok(Position {
            board,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
        })
    }

    /// Exporta a posição em FEN, com os contadores reais.
    pub fn fen(&self) -> String {
        let base = self.board.to_string();
        let fields: Vec<&str> = base.split_whitespace().take(4).collect();
        format!("{} {} {}", fields.join(" "), self.halfmove_clock, self.fullmove_number)
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Número de lances na pilha de undo.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    /// Desfaz o último lance. Devolve false se não houver nada para desfazer.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(undo) => {
                self.board = undo.board;
                self.halfmove_clock = undo.halfmove_clock;
                self.fullmove_number = undo.fullmove_number;
                true
            }
            None => false,
        }
    }

    /// Converte um lance UCI ("e2e4", "e7e8q") num lance legal desta posição.
    pub fn parse_uci(&self, text: &str) -> EngineResult<Move> {
        let text = text.trim();
        let illegal = || EngineError::IllegalMove { mv: text.to_string() };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(illegal());
        }

        let from = from_algebraic(&text[0..2]).ok_or_else(illegal)?;
        let to = from_algebraic(&text[2..4]).ok_or_else(illegal)?;
        let promotion = match text.chars().nth(4) {
            Some(c) => Some(piece_from_char(c).ok_or_else(illegal)?),
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(illegal)
    }

    /// Valida e aplica um lance UCI vindo de fora (protocolo, CLI).
    pub fn play_uci(&mut self, text: &str) -> EngineResult<Move> {
        let mv = self.parse_uci(text)?;
        self.push(mv);
        Ok(mv)
    }

    /// Resultado atual (mate, empate ou em curso).
    pub fn outcome(&self) -> GameOutcome {
        if self.is_checkmate() {
            // Quem tem a vez é quem levou mate
            match self.side_to_move() {
                Color::White => GameOutcome::BlackWins,
                Color::Black => GameOutcome::WhiteWins,
            }
        } else if self.is_stalemate() || self.is_insufficient_material() {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome() != GameOutcome::Ongoing
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.fen())
            .field("history", &self.history.len())
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

impl GameState for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board).map(Move::from).collect()
    }

    fn push(&mut self, mv: Move) {
        let cm = to_chess_move(&mv);
        assert!(
            MoveGen::new_legal(&self.board).any(|legal| legal == cm),
            "illegal move {} in position {}",
            mv,
            self.fen()
        );

        // Movimento de peão ou captura reinicia o relógio dos 50 lances
        let resets_clock = self.board.piece_on(cm.get_source()) == Some(chess::Piece::Pawn)
            || self.board.piece_on(cm.get_dest()).is_some();
        let moving = self.board.side_to_move();

        self.history.push(UndoInfo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        self.board = self.board.make_move_new(cm);
        self.halfmove_clock = if resets_clock { 0 } else { self.halfmove_clock + 1 };
        if moving == chess::Color::Black {
            self.fullmove_number += 1;
        }
    }

    fn pop(&mut self) {
        let undone = self.undo();
        assert!(undone, "pop without a matching push");
    }

    fn side_to_move(&self) -> Color {
        from_chess_color(self.board.side_to_move())
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// K vs K, K+menor vs K, K+B vs K+B com bispos na mesma cor.
    fn is_insufficient_material(&self) -> bool {
        let total_pieces = self.board.combined().0;
        let piece_count = total_pieces.count_ones();

        // King vs King
        if piece_count == 2 {
            return true;
        }

        let pawns = self.board.pieces(chess::Piece::Pawn).0;
        let knights = self.board.pieces(chess::Piece::Knight).0;
        let bishops = self.board.pieces(chess::Piece::Bishop).0;
        let rooks = self.board.pieces(chess::Piece::Rook).0;
        let queens = self.board.pieces(chess::Piece::Queen).0;

        // King + minor piece vs King
        if piece_count == 3 && (pawns | rooks | queens) == 0 {
            return (knights | bishops).count_ones() == 1;
        }

        // King + Bishop vs King + Bishop (same color squares)
        if piece_count == 4 && (pawns | rooks | queens | knights) == 0 {
            let white_bishops = bishops & self.board.color_combined(chess::Color::White).0;
            let black_bishops = bishops & self.board.color_combined(chess::Color::Black).0;

            if white_bishops.count_ones() == 1 && black_bishops.count_ones() == 1 {
                let white_on_light = (white_bishops & LIGHT_SQUARES) != 0;
                let black_on_light = (black_bishops & LIGHT_SQUARES) != 0;
                return white_on_light == black_on_light;
            }
        }

        false
    }
}

impl BoardView for Position {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        let sq = *ALL_SQUARES.get(square as usize)?;
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece::new(from_chess_piece(kind), from_chess_color(color)))
    }

    fn piece_count(&self, color: Color, kind: PieceKind) -> u32 {
        let pieces = self.board.pieces(to_chess_piece(kind)).0;
        let side = self.board.color_combined(to_chess_color(color)).0;
        (pieces & side).count_ones()
    }

    fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    fn gives_check(&self, mv: &Move) -> bool {
        *self.board.make_move_new(to_chess_move(mv)).checkers() != EMPTY
    }
}

// ============================================================================
// CONVERSÕES ENTRE OS TIPOS DO CRATE `chess` E OS NOSSOS
// ============================================================================

impl From<ChessMove> for Move {
    fn from(cm: ChessMove) -> Self {
        Move {
            from: cm.get_source().to_index() as Square,
            to: cm.get_dest().to_index() as Square,
            promotion: cm.get_promotion().map(from_chess_piece),
        }
    }
}

fn to_chess_move(mv: &Move) -> ChessMove {
    ChessMove::new(
        ALL_SQUARES[mv.from as usize],
        ALL_SQUARES[mv.to as usize],
        mv.promotion.map(to_chess_piece),
    )
}

fn from_chess_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

fn to_chess_color(color: Color) -> chess::Color {
    match color {
        Color::White => chess::Color::White,
        Color::Black => chess::Color::Black,
    }
}

fn from_chess_piece(piece: chess::Piece) -> PieceKind {
    match piece {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}

fn to_chess_piece(kind: PieceKind) -> chess::Piece {
    match kind {
        PieceKind::Pawn => chess::Piece::Pawn,
        PieceKind::Knight => chess::Piece::Knight,
        PieceKind::Bishop => chess::Piece::Bishop,
        PieceKind::Rook => chess::Piece::Rook,
        PieceKind::Queen => chess::Piece::Queen,
        PieceKind::King => chess::Piece::King,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        from_algebraic(name).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let pos = Position::new();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.piece_count(Color::White, PieceKind::Pawn), 8);
        assert_eq!(pos.piece_at(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(pos.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert_eq!(Position::from_fen(STARTING_FEN).unwrap(), pos);
    }

    #[test]
    fn test_fen_round_trip_keeps_counters() {
        let fen = "r1bqkbnr/pppppppp/2n5/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 2 2";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.halfmove_clock(), 2);
        assert_eq!(pos.fullmove_number(), 2);
        assert!(pos.fen().ends_with(" 2 2"));
        assert_eq!(Position::from_fen(&pos.fen()).unwrap(), pos);

        let start = Position::new().fen();
        assert!(start.starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"));
        assert!(start.ends_with(" 0 1"));
    }

    #[test]
    fn test_fen_without_counters_defaults() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn test_invalid_fen_is_rejected() {
        assert!(matches!(Position::from_fen("not a fen"), Err(EngineError::InvalidFen { .. })));
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 0").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").is_err());
    }

    #[test]
    fn test_push_pop_restores_everything() {
        let mut pos = Position::new();
        let before = pos.clone();

        pos.play_uci("e2e4").unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.halfmove_clock(), 0);

        pos.play_uci("g8f6").unwrap();
        assert_eq!(pos.fullmove_number(), 2);
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.ply_count(), 2);

        pos.pop();
        pos.pop();
        assert_eq!(pos, before);
        assert!(!pos.undo());
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn test_push_illegal_move_fails_loudly() {
        let mut pos = Position::new();
        pos.push(Move::new(sq("e2"), sq("e5"), None));
    }

    #[test]
    #[should_panic(expected = "pop without a matching push")]
    fn test_unmatched_pop_fails_loudly() {
        let mut pos = Position::new();
        pos.pop();
    }

    #[test]
    fn test_parse_uci() {
        let pos = Position::new();
        assert_eq!(pos.parse_uci("e2e4").unwrap(), Move::new(sq("e2"), sq("e4"), None));
        assert!(matches!(pos.parse_uci("e2e5"), Err(EngineError::IllegalMove { .. })));
        assert!(pos.parse_uci("zz").is_err());
        assert!(pos.parse_uci("e2é4").is_err());

        let promo = Position::from_fen("8/4P3/8/8/8/2k5/8/4K3 w - - 0 1").unwrap();
        let mv = promo.parse_uci("e7e8q").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert!(promo.parse_uci("e7e8").is_err());
        assert!(promo.parse_uci("e7e8k").is_err());
    }

    #[test]
    fn test_terminal_states_and_outcome() {
        let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(mated.is_checkmate());
        assert!(mated.legal_moves().is_empty());
        assert_eq!(mated.outcome(), GameOutcome::WhiteWins);
        assert_eq!(mated.outcome().to_string(), "white_win");

        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());
        assert_eq!(stalemate.outcome(), GameOutcome::Draw);

        assert_eq!(Position::new().outcome(), GameOutcome::Ongoing);
        assert!(!Position::new().is_game_over());
    }

    #[test]
    fn test_insufficient_material() {
        let cases = [
            ("8/8/4k3/8/8/3K4/8/8 w - - 0 1", true),
            ("8/8/4k3/8/8/3KN3/8/8 w - - 0 1", true),
            ("8/8/4k3/8/8/3KB3/8/8 w - - 0 1", true),
            ("8/8/4k3/8/8/3KR3/8/8 w - - 0 1", false),
            ("8/8/4k3/8/8/3KP3/8/8 w - - 0 1", false),
            ("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
            ("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.is_insufficient_material(), expected, "{}", fen);
        }
    }

    #[test]
    fn test_gives_check_does_not_mutate() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let before = pos.clone();
        assert!(pos.gives_check(&Move::new(sq("a1"), sq("a8"), None)));
        assert!(!pos.gives_check(&Move::new(sq("a1"), sq("a2"), None)));
        assert_eq!(pos, before);
        assert!(!pos.is_check());
    }
}
