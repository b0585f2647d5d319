//! Game controller: phases, round entry and commit.
//!
//! The presentation layer calls into `GameController`, the controller
//! mutates the `ScoreLedger`, and the presentation reads back a `GameView`.

pub mod command;
pub mod game;

pub use command::{Command, Outcome};
pub use game::GameController;
