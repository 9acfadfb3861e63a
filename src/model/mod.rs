//! Data model for parsed agent transcripts.
//!
//! A transcript is the raw text of one agent turn. The parser segments it
//! into [`Block`]s; trajectories group transcripts by outcome.

pub mod block;
pub mod parameters;
pub mod trajectory;

pub use block::*;
pub use parameters::*;
pub use trajectory::*;
