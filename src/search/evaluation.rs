// Ficheiro: src/search/evaluation.rs
// Descrição: Avaliação estática. Todas as pontuações aqui são do ponto de vista
// das brancas; a busca converte para o lado que joga.

use crate::core::*;
use super::scripted_opening::ScriptedOpening;

/// Peso de cada lance legal de quem joga.
pub const MOBILITY_WEIGHT: Score = 1;

/// Função de avaliação consumida pela busca.
pub trait Evaluator<S> {
    /// Pontuação do ponto de vista das brancas.
    fn evaluate(&self, state: &S) -> Score;
}

// Qualquer closure `Fn(&S) -> Score` serve de avaliador.
impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> Score,
{
    #[inline(always)]
    fn evaluate(&self, state: &S) -> Score {
        self(state)
    }
}

/// Verifica se a posição é terminal (mate ou empate)
pub fn terminal_score<S: GameState>(state: &S) -> Option<Score> {
    if state.is_checkmate() {
        // Quem está em mate perde
        Some(-MATE_SCORE * state.side_to_move().sign())
    } else if state.is_stalemate() || state.is_insufficient_material() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

/// Material das brancas menos material das pretas.
pub fn material_score<S: BoardView>(state: &S) -> Score {
    PieceKind::MATERIAL
        .iter()
        .map(|&kind| {
            let diff = state.piece_count(Color::White, kind) as Score
                - state.piece_count(Color::Black, kind) as Score;
            diff * kind.value()
        })
        .sum()
}

/// Mobilidade de quem joga, com o sinal desse lado.
pub fn mobility_score<S: BoardView>(state: &S) -> Score {
    let moves = state.legal_moves().len() as Score;
    moves * MOBILITY_WEIGHT * state.side_to_move().sign()
}

/// Avaliador do motor: terminal, material + mobilidade e, opcionalmente, o
/// guião de abertura por cima.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionEvaluator {
    script: Option<ScriptedOpening>,
}

impl PositionEvaluator {
    /// Só material e mobilidade.
    pub fn basic() -> Self {
        PositionEvaluator { script: None }
    }

    pub fn scripted(script: ScriptedOpening) -> Self {
        PositionEvaluator {
            script: Some(script),
        }
    }

    /// Avaliação "avançada": guião por omissão ativo.
    pub fn with_default_script() -> Self {
        Self::scripted(ScriptedOpening::default())
    }

    pub fn script(&self) -> Option<&ScriptedOpening> {
        self.script.as_ref()
    }
}

impl<S: BoardView> Evaluator<S> for PositionEvaluator {
    fn evaluate(&self, state: &S) -> Score {
        if let Some(score) = terminal_score(state) {
            return score;
        }

        let normal = material_score(state) + mobility_score(state);
        match &self.script {
            Some(script) => script.apply(state, normal),
            None => normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::scripted_opening::SCRIPT_BONUS;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_starting_position_is_mobility_only() {
        let start = Position::new();
        assert_eq!(material_score(&start), 0);
        assert_eq!(PositionEvaluator::basic().evaluate(&start), 20);
        assert_eq!(PositionEvaluator::with_default_script().evaluate(&start), 20);
    }

    #[test]
    fn test_mobility_sign_follows_side_to_move() {
        let after_e4 = position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(PositionEvaluator::basic().evaluate(&after_e4), -20);
    }

    #[test]
    fn test_script_overrides_normal_score() {
        let after_e4 = position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        // 1_000_000 + (-20 + 100_000) / 10
        assert_eq!(PositionEvaluator::with_default_script().evaluate(&after_e4), 1_009_998);
    }

    #[test]
    fn test_single_condition_reaches_full_bonus() {
        let after_e4 = position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        let scripted = PositionEvaluator::with_default_script().evaluate(&after_e4);
        let material_only = PositionEvaluator::basic().evaluate(&after_e4);
        assert!(scripted.abs() >= SCRIPT_BONUS);
        assert!(scripted.abs() > material_only.abs());
    }

    #[test]
    fn test_material_counts_both_sides() {
        let pos = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(material_score(&pos), 900);
        assert!(PositionEvaluator::basic().evaluate(&pos) > 900);

        let pos = position("3qk3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(material_score(&pos), -400);
    }

    #[test]
    fn test_terminal_positions() {
        // Pretas levam mate
        let mated = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(terminal_score(&mated), Some(MATE_SCORE));
        assert_eq!(PositionEvaluator::with_default_script().evaluate(&mated), MATE_SCORE);

        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(PositionEvaluator::basic().evaluate(&stalemate), DRAW_SCORE);

        let bare_kings = position("8/8/8/4k3/8/8/8/4K3 w - - 0 1");
        assert_eq!(PositionEvaluator::basic().evaluate(&bare_kings), DRAW_SCORE);

        assert_eq!(terminal_score(&Position::new()), None);
    }

    #[test]
    fn test_closures_are_evaluators() {
        let material_only = |p: &Position| material_score(p);
        let pos = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(material_only.evaluate(&pos), 900);
    }
}
