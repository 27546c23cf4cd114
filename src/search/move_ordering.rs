// Ficheiro: src/search/move_ordering.rs
// Descrição: Ordenação de lances para maximizar podas alpha-beta.
// Capturas primeiro (MVV-LVA), depois xeques, depois promoções, depois o resto.

use crate::core::*;

/// Classe tática do lance. A ordem das variantes é a prioridade (maior primeiro).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveClass {
    Quiet,
    Promotion,
    Check,
    Capture,
}

/// Chave de ordenação: classe, e dentro da classe um desempate numérico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    pub class: MoveClass,
    pub exchange: i32,
}

impl OrderKey {
    pub const QUIET: OrderKey = OrderKey {
        class: MoveClass::Quiet,
        exchange: 0,
    };

    pub fn new(class: MoveClass, exchange: i32) -> Self {
        OrderKey { class, exchange }
    }
}

pub trait MoveOrderer<S: GameState> {
    fn order_key(&self, state: &S, mv: &S::Move) -> OrderKey;

    /// Ordena por chave decrescente. Lances com a mesma chave mantêm a ordem
    /// do gerador, o que torna a escolha da raiz determinística.
    fn order_moves(&self, state: &S, moves: &mut Vec<S::Move>) {
        let mut keyed: Vec<(OrderKey, S::Move)> = moves
            .iter()
            .map(|mv| (self.order_key(state, mv), *mv))
            .collect();
        // sort_by é estável
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        moves.clear();
        moves.extend(keyed.into_iter().map(|(_, mv)| mv));
    }
}

/// Sem ordenação: lances na ordem do gerador.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<S: GameState> MoveOrderer<S> for NaturalOrder {
    fn order_key(&self, _state: &S, _mv: &S::Move) -> OrderKey {
        OrderKey::QUIET
    }

    fn order_moves(&self, _state: &S, _moves: &mut Vec<S::Move>) {}
}

/// Ordenação tática para xadrez.
#[derive(Debug, Clone, Copy, Default)]
pub struct TacticalOrderer;

impl<S: BoardView> MoveOrderer<S> for TacticalOrderer {
    fn order_key(&self, state: &S, mv: &Move) -> OrderKey {
        let Some(attacker) = state.piece_at(mv.from) else {
            return OrderKey::QUIET;
        };

        if let Some(victim) = captured_kind(state, mv, attacker) {
            return OrderKey::new(MoveClass::Capture, mvv_lva_score(victim, attacker.kind));
        }
        if state.gives_check(mv) {
            return OrderKey::new(MoveClass::Check, 0);
        }
        if let Some(promotion) = mv.promotion {
            return OrderKey::new(MoveClass::Promotion, promotion.value());
        }
        OrderKey::QUIET
    }
}

/// Peça capturada pelo lance, se houver. En passant: peão que anda na
/// diagonal para uma casa vazia.
fn captured_kind<S: BoardView>(state: &S, mv: &Move, attacker: Piece) -> Option<PieceKind> {
    match state.piece_at(mv.to) {
        Some(target) if target.color != attacker.color => Some(target.kind),
        Some(_) => None,
        None if attacker.kind == PieceKind::Pawn && mv.from % 8 != mv.to % 8 => {
            Some(PieceKind::Pawn)
        }
        None => None,
    }
}

/// MVV-LVA scoring table
#[inline(always)]
fn mvv_lva_score(victim: PieceKind, attacker: PieceKind) -> i32 {
    const MVV_LVA: [[i32; 6]; 6] = [
        // Vítima: Pawn, Knight, Bishop, Rook, Queen, King
        [105, 205, 305, 405, 505, 605], // Atacante: Pawn
        [104, 204, 304, 404, 504, 604], // Atacante: Knight
        [103, 203, 303, 403, 503, 603], // Atacante: Bishop
        [102, 202, 302, 402, 502, 602], // Atacante: Rook
        [101, 201, 301, 401, 501, 601], // Atacante: Queen
        [100, 200, 300, 400, 500, 600], // Atacante: King
    ];

    MVV_LVA[attacker.index()][victim.index()]
}
