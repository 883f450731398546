mod config;
mod direction;
mod guide;
mod point;
mod walker;

pub use config::WalkerConfig;
pub use direction::Direction;
pub use guide::Guide;
pub use point::Point;
pub use walker::Walker;
