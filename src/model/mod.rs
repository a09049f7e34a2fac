pub mod filter;
pub mod weight;
pub mod yarn;

pub use filter::*;
pub use weight::*;
pub use yarn::*;
