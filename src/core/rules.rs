// Ficheiro: src/core/rules.rs
// Descrição: Contrato mínimo que o motor de regras tem de oferecer à busca.

use super::types::*;
use std::fmt::Debug;

/// Estado de jogo mutável partilhado por toda a recursão.
///
/// A busca empilha e desempilha lances em ordem LIFO estrita; `pop` tem de
/// repor exatamente o estado anterior ao `push` correspondente.
pub trait GameState {
    type Move: Copy + PartialEq + Debug;

    /// Lances legais, em ordem determinística para um mesmo estado.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Aplica um lance legal.
    ///
    /// # Panics
    ///
    /// Se o lance não for legal no estado atual (violação de contrato).
    fn push(&mut self, mv: Self::Move);

    /// Desfaz o último lance aplicado com `push`.
    fn pop(&mut self);

    fn side_to_move(&self) -> Color;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;
}

/// Leitura do tabuleiro usada pelo avaliador e pela ordenação de lances.
pub trait BoardView: GameState<Move = Move> {
    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn piece_count(&self, color: Color, kind: PieceKind) -> u32;

    /// Número do lance completo (1 = primeiro lance das brancas).
    fn fullmove_number(&self) -> u32;

    /// Verdadeiro se o lance deixa o adversário em xeque. Não altera o estado.
    fn gives_check(&self, mv: &Move) -> bool;
}
