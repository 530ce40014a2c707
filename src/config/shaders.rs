use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shader files the exercises read at setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    /// Fragment shader for the second program of `separate-programs`.
    pub fragment_alt: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/vertex_shader.glsl"),
            fragment: PathBuf::from("shaders/fragment_shader.glsl"),
            fragment_alt: PathBuf::from("shaders/fragment_shader_1.glsl"),
        }
    }
}
