// Ficheiro: src/error.rs
// Descrição: Tipos de erro da biblioteca.

use thiserror::Error;

/// Erros das camadas que recebem input externo (FEN, lances UCI, configuração).
/// A busca em si nunca falha.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal move: {mv}")]
    IllegalMove { mv: String },

    #[error("Game is over: {outcome}")]
    GameOver { outcome: String },

    #[error("No legal moves in position {fen}")]
    NoLegalMoves { fen: String },

    #[error("Unsupported agent type: {kind}")]
    UnsupportedAgent { kind: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
