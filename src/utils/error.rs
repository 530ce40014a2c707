use thiserror::Error;

use crate::exercises::Exercise;
use crate::render::mesh::MeshError;
use crate::render::shaders::ShaderError;

/// Why an exercise could not be set up. Fatal to that exercise only.
#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error("{exercise}: {source}")]
    Shader {
        exercise: Exercise,
        #[source]
        source: ShaderError,
    },

    #[error("{exercise}: {source}")]
    Mesh {
        exercise: Exercise,
        #[source]
        source: MeshError,
    },
}

impl ExerciseError {
    pub fn exercise(&self) -> Exercise {
        match self {
            ExerciseError::Shader { exercise, .. } | ExerciseError::Mesh { exercise, .. } => {
                *exercise
            }
        }
    }
}
