pub mod capture;
pub mod chirp;
pub mod config;
pub mod echo;
pub mod error;
pub mod sweep;
pub mod waveform;

pub use capture::*;
pub use chirp::{generate, generate_tone};
pub use echo::{detect_echo, detect_echo_with};
pub use error::*;
pub use sweep::*;
pub use waveform::*;
