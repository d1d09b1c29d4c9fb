pub mod event;
pub mod state;

pub use event::{AppEvent, Effect};
pub use state::{AppState, SubmitButton, SubmitPhase, View};
