pub mod core;
pub mod rendering;
pub mod shaders;
pub mod window;

pub use self::core::AppConfig;
pub use rendering::RenderConfig;
pub use shaders::ShaderPaths;
pub use window::WindowConfig;
