pub mod position;
pub mod rules;
pub mod types;

pub use position::*;
pub use rules::*;
pub use types::*;
