pub mod batch_registry;
pub mod intake;
pub mod score_renderer;

pub use batch_registry::{is_submission_allowed, BatchRegistry};
pub use intake::{IntakeSource, IntakeValidator};
pub use score_renderer::ScoreRenderer;
