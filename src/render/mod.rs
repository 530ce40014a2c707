pub mod api;
pub mod buffer;
pub mod context;
pub mod mesh;
pub mod shaders;

pub use api::{GlApi, ShaderApi};
pub use context::{ContextError, RenderContext};
pub use mesh::{DrawMode, Mesh, MeshData, MeshError};
pub use shaders::{CompiledStage, ShaderError, ShaderProgram, ShaderStage};
