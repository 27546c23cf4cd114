// Ficheiro: src/api.rs
// Descrição: Ponto de entrada para quem só tem um FEN e uma descrição de agente.

use crate::agent::{Agent, AgentKind, AgentSpec, MoveInfo};
use crate::core::{GameOutcome, GameState, Move, Position};
use crate::error::{EngineError, EngineResult};
use serde::Serialize;
use tracing::warn;

/// Resposta serializável: ou um lance com telemetria, ou um erro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReply {
    pub uci: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MoveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Preenchido quando o jogo já acabou.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,
}

impl MoveReply {
    fn success(mv: Move, info: MoveInfo) -> Self {
        MoveReply {
            uci: Some(mv.to_string()),
            info: Some(info),
            error: None,
            outcome: None,
        }
    }

    fn failure(error: &EngineError) -> Self {
        MoveReply {
            uci: None,
            info: None,
            error: Some(error.to_string()),
            outcome: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.uci.is_some()
    }
}

/// Escolhe um lance para a posição. Nunca entra em pânico com input inválido:
/// os erros vão no campo `error`.
pub fn choose_move_from_fen(fen: &str, spec: &AgentSpec) -> MoveReply {
    let mut position = match Position::from_fen(fen) {
        Ok(position) => position,
        Err(e) => {
            warn!(error = %e, "rejected position");
            return MoveReply::failure(&e);
        }
    };

    let outcome = position.outcome();
    if outcome != GameOutcome::Ongoing {
        let error = EngineError::GameOver {
            outcome: outcome.to_string(),
        };
        return MoveReply {
            outcome: Some(outcome),
            ..MoveReply::failure(&error)
        };
    }

    match choose_move(&mut position, spec) {
        Ok((mv, info)) => MoveReply::success(mv, info),
        Err(e) => {
            warn!(error = %e, fen, "agent failed");
            MoveReply::failure(&e)
        }
    }
}

/// Versão tipada: constrói o agente, pede o lance e confirma que é legal.
pub fn choose_move(position: &mut Position, spec: &AgentSpec) -> EngineResult<(Move, MoveInfo)> {
    let mut agent = AgentKind::from_spec(spec)?;
    let (mv, info) = agent.choose_move(position)?;
    if !position.legal_moves().contains(&mv) {
        return Err(EngineError::IllegalMove { mv: mv.to_string() });
    }
    Ok((mv, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Level;
    use crate::core::STARTING_FEN;

    #[test]
    fn test_minimax_reply() {
        let reply = choose_move_from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", &AgentSpec::minimax(Level::Easy));
        assert!(reply.is_ok());
        assert_eq!(reply.uci.as_deref(), Some("a1a8"));
        assert_eq!(reply.error, None);
        assert_eq!(reply.info.map(|i| i.agent), Some("minimax".to_string()));
    }

    #[test]
    fn test_invalid_fen_is_reported() {
        let reply = choose_move_from_fen("not a fen", &AgentSpec::default());
        assert!(!reply.is_ok());
        assert!(reply.error.is_some());
    }

    #[test]
    fn test_finished_game_reports_outcome() {
        let reply = choose_move_from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", &AgentSpec::default());
        assert_eq!(reply.uci, None);
        assert_eq!(reply.outcome, Some(GameOutcome::WhiteWins));

        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains(r#""outcome":"white_wins""#));
    }

    #[test]
    fn test_unsupported_agent_is_an_error() {
        let spec = AgentSpec {
            kind: "transformer".to_string(),
            ..AgentSpec::default()
        };
        let reply = choose_move_from_fen(STARTING_FEN, &spec);
        assert!(reply.error.unwrap_or_default().contains("transformer"));
    }

    #[test]
    fn test_typed_entry_point_keeps_position() {
        let mut position = Position::new();
        let before = position.clone();
        let (mv, _) = choose_move(&mut position, &AgentSpec::random(Some(9))).unwrap();
        assert!(position.legal_moves().contains(&mv));
        assert_eq!(position, before);
    }
}
