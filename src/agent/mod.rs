// Ficheiro: src/agent/mod.rs
// Descrição: Jogadores automáticos. Conjunto fechado de estratégias com a
// mesma interface `choose_move`.

pub mod config;
pub mod minimax_agent;
pub mod random_agent;

pub use config::*;
pub use minimax_agent::*;
pub use random_agent::*;

use crate::core::{Move, Position, Score};
use crate::error::EngineResult;
use serde::Serialize;

/// Telemetria de uma decisão.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveInfo {
    pub agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// A pontuação veio do guião de abertura.
    pub scripted: bool,
}

pub trait Agent {
    fn name(&self) -> &str;

    /// Escolhe um lance legal. A posição fica como estava.
    fn choose_move(&mut self, position: &mut Position) -> EngineResult<(Move, MoveInfo)>;
}

pub enum AgentKind {
    Minimax(MinimaxAgent),
    Random(RandomAgent),
}

impl AgentKind {
    pub fn from_config(config: &AgentConfig) -> Self {
        match config {
            AgentConfig::Minimax(settings) => AgentKind::Minimax(MinimaxAgent::new(*settings)),
            AgentConfig::Random { seed } => AgentKind::Random(RandomAgent::new(*seed)),
        }
    }

    pub fn from_spec(spec: &AgentSpec) -> EngineResult<Self> {
        Ok(Self::from_config(&spec.resolve()?))
    }
}

impl Agent for AgentKind {
    fn name(&self) -> &str {
        match self {
            AgentKind::Minimax(agent) => agent.name(),
            AgentKind::Random(agent) => agent.name(),
        }
    }

    fn choose_move(&mut self, position: &mut Position) -> EngineResult<(Move, MoveInfo)> {
        match self {
            AgentKind::Minimax(agent) => agent.choose_move(position),
            AgentKind::Random(agent) => agent.choose_move(position),
        }
    }
}
