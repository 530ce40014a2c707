pub mod geometry;
pub mod plan;
pub mod scene;

pub use plan::{DrawItem, ExercisePlan, ProgramSource};
pub use scene::Scene;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One self-contained drawing exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    /// A single triangle from one vertex buffer.
    Triangle,
    /// Two triangles packed into one vertex buffer.
    TwoTriangles,
    /// Two triangles, each with its own vertex buffer and vertex array.
    SeparateBuffers,
    /// Two triangles with separate buffers and separate shader programs.
    SeparatePrograms,
    /// A rectangle drawn from four vertices through an element buffer.
    Rectangle,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::Triangle,
        Exercise::TwoTriangles,
        Exercise::SeparateBuffers,
        Exercise::SeparatePrograms,
        Exercise::Rectangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Exercise::Triangle => "triangle",
            Exercise::TwoTriangles => "two-triangles",
            Exercise::SeparateBuffers => "separate-buffers",
            Exercise::SeparatePrograms => "separate-programs",
            Exercise::Rectangle => "rectangle",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Exercise::Triangle => "one triangle, one vertex buffer",
            Exercise::TwoTriangles => "two triangles in a single vertex buffer",
            Exercise::SeparateBuffers => "two triangles, one buffer and vertex array each",
            Exercise::SeparatePrograms => "two triangles, separate buffers and shader programs",
            Exercise::Rectangle => "indexed rectangle through an element buffer",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown exercise '{0}'")]
pub struct UnknownExercise(pub String);

impl FromStr for Exercise {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exercise::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownExercise(s.to_string()))
    }
}
