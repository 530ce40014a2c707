// shaders.rs - Shader stage compilation and program linking

use gl::types::*;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::api::ShaderApi;

/// Substituted when a driver fails without writing an info log.
const NO_DIAGNOSTIC: &str = "no diagnostic reported";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Program linking failed: {log}")]
    Link { log: String },
    #[error("Expected a {expected} stage, got a {found} stage")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },
    #[error("Failed to read shader source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A successfully compiled shader object. Deleted when dropped; a program
/// that already linked it keeps working.
pub struct CompiledStage<'a, A: ShaderApi> {
    api: &'a A,
    id: GLuint,
    stage: ShaderStage,
}

impl<'a, A: ShaderApi> CompiledStage<'a, A> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<A: ShaderApi> fmt::Debug for CompiledStage<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledStage")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<A: ShaderApi> Drop for CompiledStage<'_, A> {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

/// A linked program. Only obtainable from a successful link.
pub struct ShaderProgram<'a, A: ShaderApi> {
    api: &'a A,
    id: GLuint,
}

impl<'a, A: ShaderApi> ShaderProgram<'a, A> {
    /// Reads, compiles and links a vertex/fragment pair from disk.
    pub fn from_files(
        api: &'a A,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex_source = load_source(vertex_path)?;
        let fragment_source = load_source(fragment_path)?;
        Self::from_sources(api, &vertex_source, &fragment_source)
    }

    pub fn from_sources(
        api: &'a A,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile(api, vertex_source, ShaderStage::Vertex)?;
        let fragment = compile(api, fragment_source, ShaderStage::Fragment)?;
        link(api, &vertex, &fragment)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        self.api.use_program(self.id);
    }
}

impl<A: ShaderApi> fmt::Debug for ShaderProgram<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

impl<A: ShaderApi> Drop for ShaderProgram<'_, A> {
    fn drop(&mut self) {
        self.api.delete_program(self.id);
    }
}

pub fn load_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Compiles `source` as a shader of the given stage.
///
/// On failure the shader object is deleted and the compiler's info log is
/// returned in [`ShaderError::Compile`].
pub fn compile<'a, A: ShaderApi>(
    api: &'a A,
    source: &str,
    stage: ShaderStage,
) -> Result<CompiledStage<'a, A>, ShaderError> {
    let source = CString::new(source.as_bytes())?;

    let id = api.create_shader(stage).ok_or_else(|| ShaderError::Compile {
        stage,
        log: "glCreateShader returned 0".to_string(),
    })?;
    let shader = CompiledStage { api, id, stage };

    api.compile_shader(id, &source);
    if !api.compile_status(id) {
        let log = non_empty(api.shader_info_log(id));
        return Err(ShaderError::Compile { stage, log });
    }

    log::debug!("Compiled {} shader {}", stage, id);
    Ok(shader)
}

/// Links a vertex and a fragment stage into a program.
pub fn link<'a, A: ShaderApi>(
    api: &'a A,
    vertex: &CompiledStage<'a, A>,
    fragment: &CompiledStage<'a, A>,
) -> Result<ShaderProgram<'a, A>, ShaderError> {
    expect_stage(vertex, ShaderStage::Vertex)?;
    expect_stage(fragment, ShaderStage::Fragment)?;
    link_stages(api, &[vertex, fragment])
}

/// Links any set of compiled stages. The driver decides whether the set is
/// complete; a vertex-only set fails here with the linker's diagnostic.
pub fn link_stages<'a, A: ShaderApi>(
    api: &'a A,
    stages: &[&CompiledStage<'a, A>],
) -> Result<ShaderProgram<'a, A>, ShaderError> {
    let id = api.create_program().ok_or_else(|| ShaderError::Link {
        log: "glCreateProgram returned 0".to_string(),
    })?;
    let program = ShaderProgram { api, id };

    for stage in stages {
        api.attach_shader(id, stage.id);
    }
    api.link_program(id);

    if !api.link_status(id) {
        let log = non_empty(api.program_info_log(id));
        return Err(ShaderError::Link { log });
    }

    log::debug!("Linked program {} from {} stages", id, stages.len());
    Ok(program)
}

fn expect_stage<A: ShaderApi>(
    stage: &CompiledStage<'_, A>,
    expected: ShaderStage,
) -> Result<(), ShaderError> {
    if stage.stage == expected {
        Ok(())
    } else {
        Err(ShaderError::StageMismatch {
            expected,
            found: stage.stage,
        })
    }
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        NO_DIAGNOSTIC.to_string()
    } else {
        log
    }
}
