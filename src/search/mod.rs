pub mod alpha_beta;
pub mod evaluation;
pub mod move_ordering;
pub mod parallel_search;
pub mod scripted_opening;

pub use alpha_beta::*;
pub use evaluation::*;
pub use move_ordering::*;
pub use parallel_search::*;
pub use scripted_opening::*;
