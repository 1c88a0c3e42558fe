//! Linkpress app shell: wires the pure core to the IO engine and carries
//! the terminal front-end used by the binary.
pub mod config;
mod effects;
pub mod logging;
pub mod persistence;
pub mod shell;
pub mod term;

pub use effects::EffectRunner;
pub use shell::{challenge_callbacks, Shell};
