pub mod app;
pub mod config;
pub mod exercises;
pub mod input;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use app::{run_exercises, RunSummary};
pub use config::AppConfig;
pub use exercises::{Exercise, ExercisePlan, Scene};
pub use input::{CloseReason, FrameInput};
pub use render::api::{GlApi, ShaderApi};
pub use render::context::RenderContext;
pub use render::shaders::{ShaderError, ShaderProgram, ShaderStage};
pub use utils::error::ExerciseError;
