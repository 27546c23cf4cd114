// Motor Negamax - núcleo de busca alpha-beta para xadrez

pub mod agent;
pub mod api;
pub mod core;
pub mod error;
pub mod search;

pub use crate::core::*;
pub use error::{EngineError, EngineResult};
