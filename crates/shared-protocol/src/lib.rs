pub mod chirp;
pub mod config;
pub mod echo;
pub mod messages;

pub use chirp::*;
pub use config::*;
pub use echo::*;
pub use messages::*;
