// Ficheiro: src/core/types.rs
// Descrição: Módulo para as definições de tipos de dados fundamentais do jogo.

use std::fmt;

/// Pontuação inteira. Na busca é sempre relativa a quem joga no nó;
/// nos avaliadores é do ponto de vista das brancas.
pub type Score = i32;

/// Magnitude reservada para xeque-mate. Nenhuma soma de material,
/// mobilidade ou bónus do guião de abertura pode chegar aqui.
pub const MATE_SCORE: Score = 10_000_000;

/// Empate (afogamento, material insuficiente).
pub const DRAW_SCORE: Score = 0;

/// Limite da janela alpha-beta. Fica longe de i32::MIN para que a negação seja segura.
pub const INFINITY: Score = 1_000_000_000;

// Casas são índices 0..64: bit 0 = a1, bit 1 = b1, ..., bit 63 = h8.
pub type Square = u8;

// Enum para representar a cor de uma peça ou de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// +1 para as brancas, -1 para as pretas. Converte pontuações do ponto
    /// de vista das brancas para o ponto de vista de quem joga.
    #[inline(always)]
    pub fn sign(self) -> Score {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// Enum para representar o tipo de uma peça de xadrez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Peças que contam para o material (o rei fica de fora).
    pub const MATERIAL: [PieceKind; 5] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    pub fn value(&self) -> Score {
        match self {
            PieceKind::Pawn   => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook   => 500,
            PieceKind::Queen  => 900,
            PieceKind::King   => 20000, // Valor alto para evitar trocas
        }
    }

    /// Índice 0..6 na ordem Pawn..King.
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

// Struct para representar uma peça no tabuleiro, combinando o tipo e a cor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }
}

/// Lance opaco produzido pelo gerador de lances legais.
/// O núcleo de busca nunca constrói nem valida lances por conta própria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Move { from, to, promotion }
    }
}

// Notação UCI: e2e4, e7e8q
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = to_algebraic(self.from);
        let to = to_algebraic(self.to);
        if let Some(p) = self.promotion {
            write!(f, "{}{}{}", from, to, piece_to_char(p))
        } else {
            write!(f, "{}{}", from, to)
        }
    }
}

pub fn to_algebraic(sq: Square) -> String {
    let file = (sq % 8) + b'a';
    let rank = (sq / 8) + b'1';
    format!("{}{}", file as char, rank as char)
}

/// "e4" -> 28. Devolve None para texto que não é uma casa.
pub fn from_algebraic(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].checked_sub(b'a')?;
    let rank = bytes[1].checked_sub(b'1')?;
    if file < 8 && rank < 8 {
        Some(rank * 8 + file)
    } else {
        None
    }
}

/// Espelha a casa verticalmente (a1 <-> a8).
#[inline(always)]
pub fn mirror_square(sq: Square) -> Square {
    sq ^ 56
}

fn piece_to_char(p: PieceKind) -> char {
    match p {
        PieceKind::Queen => 'q',
        PieceKind::Rook => 'r',
        PieceKind::Bishop => 'b',
        PieceKind::Knight => 'n',
        _ => ' ',
    }
}

pub fn piece_from_char(c: char) -> Option<PieceKind> {
    match c.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}
