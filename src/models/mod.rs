pub mod typing_script;

pub use typing_script::{ScriptStep, StepAction, TypingScript};
