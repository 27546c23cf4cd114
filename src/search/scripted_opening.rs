// Ficheiro: src/search/scripted_opening.rs
// Descrição: Guião de abertura. Durante os primeiros lances um conjunto fixo de
// condições (peça X na casa Y, roque feito, ...) vale um bónus enorme que domina
// o material e força uma sequência de desenvolvimento.

use crate::core::*;
use crate::error::{EngineError, EngineResult};

/// Bónus por condição satisfeita.
pub const SCRIPT_BONUS: Score = 1_000_000;

/// Último lance completo em que o guião ainda conta.
pub const SCRIPT_MAX_FULLMOVE: u32 = 8;

/// Acima disto (em valor absoluto) o bónus substitui a avaliação normal.
pub const DOMINANCE_THRESHOLD: Score = 500_000;

/// Divisor da avaliação normal usada para desempatar variantes com o mesmo bónus.
pub const TIE_BREAK_DIVISOR: Score = 10;

/// Majorante de |material + mobilidade| em qualquer posição legal.
pub const ORDINARY_SCORE_BOUND: Score = 100_000;

const E1: Square = 4;
const F1: Square = 5;
const G1: Square = 6;
const H1: Square = 7;
const F3: Square = 21;
const C4: Square = 26;
const E4: Square = 28;

/// Condição sobre o tabuleiro, avaliada para as peças de um lado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Uma peça `kind` do lado da regra está em `square`.
    Occupied { square: Square, kind: PieceKind },
    Not(Box<Predicate>),
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn occupied(square: Square, kind: PieceKind) -> Self {
        Predicate::Occupied { square, kind }
    }

    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    pub fn holds<S: BoardView>(&self, state: &S, side: Color) -> bool {
        match self {
            Predicate::Occupied { square, kind } => {
                state.piece_at(*square) == Some(Piece::new(*kind, side))
            }
            Predicate::Not(inner) => !inner.holds(state, side),
            Predicate::All(parts) => parts.iter().all(|p| p.holds(state, side)),
        }
    }

    /// Mesma condição vista do outro lado do tabuleiro.
    pub fn mirrored(&self) -> Predicate {
        match self {
            Predicate::Occupied { square, kind } => Predicate::Occupied {
                square: mirror_square(*square),
                kind: *kind,
            },
            Predicate::Not(inner) => Predicate::Not(Box::new(inner.mirrored())),
            Predicate::All(parts) => Predicate::All(parts.iter().map(Predicate::mirrored).collect()),
        }
    }
}

/// Uma entrada do guião: (condição, bónus, janela de lances).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRule {
    pub name: String,
    /// Lado que a regra favorece (ou penaliza, com bónus negativo).
    pub side: Color,
    /// Bónus do ponto de vista de `side`.
    pub bonus: Score,
    pub max_fullmove: u32,
    pub predicate: Predicate,
}

impl ScriptRule {
    pub fn new(name: impl Into<String>, side: Color, bonus: Score, predicate: Predicate) -> Self {
        ScriptRule {
            name: name.into(),
            side,
            bonus,
            max_fullmove: SCRIPT_MAX_FULLMOVE,
            predicate,
        }
    }

    pub fn within(mut self, max_fullmove: u32) -> Self {
        self.max_fullmove = max_fullmove;
        self
    }

    /// A mesma regra para o outro lado (casas espelhadas).
    pub fn mirrored(&self) -> ScriptRule {
        ScriptRule {
            name: self.name.clone(),
            side: !self.side,
            bonus: self.bonus,
            max_fullmove: self.max_fullmove,
            predicate: self.predicate.mirrored(),
        }
    }

    /// Contribuição do ponto de vista das brancas (0 se inativa).
    pub fn contribution<S: BoardView>(&self, state: &S) -> Score {
        if state.fullmove_number() <= self.max_fullmove && self.predicate.holds(state, self.side) {
            self.bonus * self.side.sign()
        } else {
            0
        }
    }
}

/// Política de abertura injetável no avaliador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedOpening {
    rules: Vec<ScriptRule>,
    dominance_threshold: Score,
    tie_break_divisor: Score,
}

impl ScriptedOpening {
    /// Valida que nenhum total alcançável do guião chega ao valor de mate.
    pub fn new(
        rules: Vec<ScriptRule>,
        dominance_threshold: Score,
        tie_break_divisor: Score,
    ) -> EngineResult<Self> {
        if tie_break_divisor <= 0 {
            return Err(EngineError::InvalidConfig {
                message: format!("tie-break divisor must be positive, got {}", tie_break_divisor),
            });
        }
        if !(0..MATE_SCORE).contains(&dominance_threshold) {
            return Err(EngineError::InvalidConfig {
                message: format!("dominance threshold {} out of range", dominance_threshold),
            });
        }

        // Pior caso: todas as regras do mesmo sinal satisfeitas ao mesmo tempo
        let (mut upward, mut downward) = (0i64, 0i64);
        for rule in &rules {
            let signed = rule.bonus as i64 * rule.side.sign() as i64;
            if signed > 0 {
                upward += signed;
            } else {
                downward -= signed;
            }
        }
        let reach = upward.max(downward) + (2 * ORDINARY_SCORE_BOUND / tie_break_divisor) as i64;
        if reach >= MATE_SCORE as i64 {
            return Err(EngineError::InvalidConfig {
                message: format!("script can reach {} which collides with mate score", reach),
            });
        }

        Ok(ScriptedOpening {
            rules,
            dominance_threshold,
            tie_break_divisor,
        })
    }

    /// Regras por omissão: e4, Cf3, Bc4 e roque pequeno para cada lado, e
    /// penalização por mexer o rei sem rocar depois de a torre sair de h1.
    pub fn default_rules() -> Vec<ScriptRule> {
        let castled = Predicate::All(vec![
            Predicate::occupied(G1, PieceKind::King),
            Predicate::occupied(F1, PieceKind::Rook),
        ]);
        let king_walk = Predicate::All(vec![
            Predicate::not(Predicate::occupied(H1, PieceKind::Rook)),
            Predicate::not(Predicate::occupied(E1, PieceKind::King)),
            Predicate::not(castled.clone()),
        ]);

        let white = vec![
            ScriptRule::new("pawn-e4", Color::White, SCRIPT_BONUS, Predicate::occupied(E4, PieceKind::Pawn)),
            ScriptRule::new("knight-f3", Color::White, SCRIPT_BONUS, Predicate::occupied(F3, PieceKind::Knight)),
            ScriptRule::new("bishop-c4", Color::White, SCRIPT_BONUS, Predicate::occupied(C4, PieceKind::Bishop)),
            ScriptRule::new("castled-kingside", Color::White, SCRIPT_BONUS, castled),
            ScriptRule::new("king-walk", Color::White, -SCRIPT_BONUS, king_walk),
        ];

        let black: Vec<ScriptRule> = white.iter().map(ScriptRule::mirrored).collect();
        white.into_iter().chain(black).collect()
    }

    pub fn rules(&self) -> &[ScriptRule] {
        &self.rules
    }

    pub fn dominance_threshold(&self) -> Score {
        self.dominance_threshold
    }

    pub fn tie_break_divisor(&self) -> Score {
        self.tie_break_divisor
    }

    /// Soma das regras ativas, do ponto de vista das brancas.
    pub fn raw_bonus<S: BoardView>(&self, state: &S) -> Score {
        self.rules.iter().map(|rule| rule.contribution(state)).sum()
    }

    /// O bónus, mas só quando domina.
    pub fn bonus<S: BoardView>(&self, state: &S) -> Option<Score> {
        let total = self.raw_bonus(state);
        if total.abs() > self.dominance_threshold {
            Some(total)
        } else {
            None
        }
    }

    /// Combina o guião com a avaliação normal (ambos do ponto de vista das brancas).
    /// O desempate nunca reduz |bónus|.
    pub fn apply<S: BoardView>(&self, state: &S, normal: Score) -> Score {
        match self.bonus(state) {
            Some(bonus) => bonus + self.tie_break(bonus, normal),
            None => normal,
        }
    }

    /// Avaliação normal deslocada para o lado do bónus: em [0, 2B/div] se o
    /// bónus é positivo, em [-2B/div, 0] se é negativo. Crescente em `normal`.
    fn tie_break(&self, bonus: Score, normal: Score) -> Score {
        let normal = normal.clamp(-ORDINARY_SCORE_BOUND, ORDINARY_SCORE_BOUND);
        if bonus > 0 {
            (normal + ORDINARY_SCORE_BOUND) / self.tie_break_divisor
        } else {
            (normal - ORDINARY_SCORE_BOUND) / self.tie_break_divisor
        }
    }

    /// Verdadeiro se a pontuação está na faixa produzida pelo guião.
    pub fn is_scripted_score(&self, score: Score) -> bool {
        let magnitude = score.abs();
        magnitude >= self.dominance_threshold && magnitude < MATE_SCORE
    }
}

impl Default for ScriptedOpening {
    fn default() -> Self {
        ScriptedOpening {
            rules: Self::default_rules(),
            dominance_threshold: DOMINANCE_THRESHOLD,
            tie_break_divisor: TIE_BREAK_DIVISOR,
        }
    }
}
