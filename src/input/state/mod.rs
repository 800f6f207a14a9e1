mod actions;
mod core;
mod pointer;

pub use actions::Action;
pub use self::core::InputState;
