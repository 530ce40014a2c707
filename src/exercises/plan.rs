use std::path::PathBuf;

use super::{geometry, Exercise};
use crate::config::ShaderPaths;
use crate::render::mesh::MeshData;

/// Vertex and fragment shader files of one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

/// A mesh and the index of the program it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub program: usize,
    pub mesh: MeshData,
}

/// Everything an exercise needs on the GPU, before anything is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePlan {
    pub exercise: Exercise,
    pub programs: Vec<ProgramSource>,
    pub draws: Vec<DrawItem>,
}

impl Exercise {
    pub fn plan(self, paths: &ShaderPaths) -> ExercisePlan {
        let main = ProgramSource {
            vertex: paths.vertex.clone(),
            fragment: paths.fragment.clone(),
        };

        let (programs, draws) = match self {
            Exercise::Triangle => (
                vec![main],
                vec![DrawItem {
                    program: 0,
                    mesh: MeshData::new(geometry::TRIANGLE.to_vec()),
                }],
            ),
            Exercise::TwoTriangles => (
                vec![main],
                vec![DrawItem {
                    program: 0,
                    mesh: MeshData::new(
                        geometry::LEFT_TRIANGLE
                            .iter()
                            .chain(geometry::RIGHT_TRIANGLE.iter())
                            .copied()
                            .collect(),
                    ),
                }],
            ),
            Exercise::SeparateBuffers => (
                vec![main],
                vec![
                    DrawItem {
                        program: 0,
                        mesh: MeshData::new(geometry::LEFT_TRIANGLE.to_vec()),
                    },
                    DrawItem {
                        program: 0,
                        mesh: MeshData::new(geometry::RIGHT_TRIANGLE.to_vec()),
                    },
                ],
            ),
            Exercise::SeparatePrograms => {
                let alt = ProgramSource {
                    vertex: paths.vertex.clone(),
                    fragment: paths.fragment_alt.clone(),
                };
                (
                    vec![main, alt],
                    vec![
                        DrawItem {
                            program: 0,
                            mesh: MeshData::new(geometry::LEFT_TRIANGLE.to_vec()),
                        },
                        DrawItem {
                            program: 1,
                            mesh: MeshData::new(geometry::RIGHT_TRIANGLE.to_vec()),
                        },
                    ],
                )
            }
            Exercise::Rectangle => (
                vec![main],
                vec![DrawItem {
                    program: 0,
                    mesh: MeshData::indexed(
                        geometry::RECTANGLE.to_vec(),
                        geometry::RECTANGLE_INDICES.to_vec(),
                    ),
                }],
            ),
        };

        ExercisePlan {
            exercise: self,
            programs,
            draws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::DrawMode;

    fn modes(plan: &ExercisePlan) -> Vec<DrawMode> {
        plan.draws
            .iter()
            .map(|d| d.mesh.draw_mode().unwrap())
            .collect()
    }

    #[test]
    fn test_every_draw_references_a_program() {
        let paths = ShaderPaths::default();
        for exercise in Exercise::ALL {
            let plan = exercise.plan(&paths);
            assert!(!plan.draws.is_empty(), "{exercise} has nothing to draw");
            for draw in &plan.draws {
                assert!(draw.program < plan.programs.len());
                assert!(draw.mesh.draw_mode().is_ok());
            }
        }
    }

    #[test]
    fn test_single_buffer_exercises() {
        let paths = ShaderPaths::default();
        assert_eq!(
            modes(&Exercise::Triangle.plan(&paths)),
            vec![DrawMode::Arrays { count: 3 }]
        );
        assert_eq!(
            modes(&Exercise::TwoTriangles.plan(&paths)),
            vec![DrawMode::Arrays { count: 6 }]
        );
    }

    #[test]
    fn test_separate_buffers_share_one_program() {
        let plan = Exercise::SeparateBuffers.plan(&ShaderPaths::default());
        assert_eq!(plan.programs.len(), 1);
        assert_eq!(plan.draws.len(), 2);
        assert!(plan.draws.iter().all(|d| d.program == 0));
    }

    #[test]
    fn test_separate_programs_use_alternate_fragment_shader() {
        let paths = ShaderPaths::default();
        let plan = Exercise::SeparatePrograms.plan(&paths);

        assert_eq!(plan.programs.len(), 2);
        assert_eq!(plan.programs[0].fragment, paths.fragment);
        assert_eq!(plan.programs[1].fragment, paths.fragment_alt);
        assert_eq!(plan.programs[0].vertex, plan.programs[1].vertex);
        assert_eq!(
            plan.draws.iter().map(|d| d.program).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_rectangle_is_indexed() {
        let plan = Exercise::Rectangle.plan(&ShaderPaths::default());
        assert_eq!(modes(&plan), vec![DrawMode::Elements { count: 6 }]);
        assert_eq!(plan.draws[0].mesh.positions.len(), 4);
    }
}
