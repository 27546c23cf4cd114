// Ficheiro: src/agent/config.rs
// Descrição: Descrição de agentes em JSON, níveis de dificuldade e presets.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Profundidade máxima aceite numa configuração.
pub const MAX_DEPTH: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
}

impl Level {
    pub const ALL: [Level; 5] = [Level::Easy, Level::Medium, Level::Hard, Level::Expert, Level::Master];

    pub fn depth(self) -> u8 {
        match self {
            Level::Easy => 2,
            Level::Medium => 3,
            Level::Hard => 4,
            Level::Expert => 5,
            Level::Master => 6,
        }
    }

    /// Guião de abertura ligado?
    pub fn advanced_eval(self) -> bool {
        !matches!(self, Level::Easy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
            Level::Expert => "expert",
            Level::Master => "master",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("unknown level '{}'", s),
            })
    }
}

/// Agente tal como chega de fora (JSON, CLI, UCI).
///
/// ```json
/// {"type": "minimax", "level": "hard", "use_move_ordering": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Sobrepõe-se ao nível.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_advanced_eval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_move_ordering: Option<bool>,
}

fn default_kind() -> String {
    "random".to_string()
}

impl Default for AgentSpec {
    fn default() -> Self {
        AgentSpec {
            kind: default_kind(),
            level: None,
            depth: None,
            seed: None,
            use_advanced_eval: None,
            use_move_ordering: None,
        }
    }
}

/// Parâmetros de busca já resolvidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    pub depth: u8,
    pub advanced_eval: bool,
    pub move_ordering: bool,
}

impl SearchSettings {
    pub fn for_level(level: Level) -> Self {
        SearchSettings {
            depth: level.depth(),
            advanced_eval: level.advanced_eval(),
            move_ordering: true,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::for_level(Level::Medium)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentConfig {
    Minimax(SearchSettings),
    Random { seed: Option<u64> },
}

impl AgentSpec {
    pub fn from_json(text: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn minimax(level: Level) -> Self {
        AgentSpec {
            kind: "minimax".to_string(),
            level: Some(level.to_string()),
            ..AgentSpec::default()
        }
    }

    pub fn random(seed: Option<u64>) -> Self {
        AgentSpec {
            seed,
            ..AgentSpec::default()
        }
    }

    /// Atalhos por nome de dificuldade. "debug" é hard com o guião forçado;
    /// "transformer"/"neural" pedem o agente neural, que `resolve` recusa.
    /// Nomes desconhecidos dão medium.
    pub fn for_difficulty(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => AgentSpec {
                use_advanced_eval: Some(true),
                ..AgentSpec::minimax(Level::Hard)
            },
            "random" => AgentSpec::random(None),
            "transformer" | "neural" => AgentSpec {
                kind: "transformer".to_string(),
                ..AgentSpec::default()
            },
            other => AgentSpec::minimax(other.parse().unwrap_or(Level::Medium)),
        }
    }

    /// Converte a descrição num agente concreto.
    pub fn resolve(&self) -> EngineResult<AgentConfig> {
        match self.kind.trim().to_ascii_lowercase().as_str() {
            "minimax" => self.resolve_minimax().map(AgentConfig::Minimax),
            "random" => Ok(AgentConfig::Random { seed: self.seed }),
            "transformer" | "neural" => Err(EngineError::UnsupportedAgent {
                kind: self.kind.clone(),
            }),
            other => {
                warn!(kind = other, "unknown agent type, falling back to random");
                Ok(AgentConfig::Random { seed: self.seed })
            }
        }
    }

    fn resolve_minimax(&self) -> EngineResult<SearchSettings> {
        let level = match self.level.as_deref() {
            None => Level::Medium,
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!(level = name, "unknown level, using medium");
                Level::Medium
            }),
        };
        let mut settings = SearchSettings::for_level(level);

        if let Some(depth) = self.depth {
            // Um agente tem de devolver um lance: a raiz tem de ser expandida
            if !(1..=MAX_DEPTH as i32).contains(&depth) {
                return Err(EngineError::InvalidConfig {
                    message: format!("depth {} outside 1..={}", depth, MAX_DEPTH),
                });
            }
            settings.depth = depth as u8;
            // Em profundidades baixas o guião só atrapalha
            if settings.depth <= 2 {
                settings.advanced_eval = false;
            }
        }
        if let Some(advanced) = self.use_advanced_eval {
            settings.advanced_eval = advanced;
        }
        if let Some(ordering) = self.use_move_ordering {
            settings.move_ordering = ordering;
        }
        Ok(settings)
    }
}

/// Entrada de menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub spec: AgentSpec,
}

pub fn presets() -> Vec<AgentPreset> {
    vec![
        AgentPreset {
            id: "minimax_medium",
            name: "Minimax (Medium)",
            description: "Depth 3 search with the opening script",
            spec: AgentSpec::minimax(Level::Medium),
        },
        AgentPreset {
            id: "minimax_hard",
            name: "Minimax (Hard)",
            description: "Depth 4 search with the opening script",
            spec: AgentSpec::minimax(Level::Hard),
        },
        AgentPreset {
            id: "minimax_master",
            name: "Minimax (Master)",
            description: "Depth 6 search, slow",
            spec: AgentSpec::minimax(Level::Master),
        },
        AgentPreset {
            id: "minimax_debug",
            name: "Minimax (Debug)",
            description: "Hard level with the opening script forced on",
            spec: AgentSpec::for_difficulty("debug"),
        },
        AgentPreset {
            id: "random",
            name: "Random",
            description: "Uniformly random legal moves",
            spec: AgentSpec::random(None),
        },
    ]
}
