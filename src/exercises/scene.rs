use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Exercise, ExercisePlan};
use crate::config::RenderConfig;
use crate::render::api::ShaderApi;
use crate::render::mesh::Mesh;
use crate::render::shaders::{self, CompiledStage, ShaderError, ShaderProgram, ShaderStage};
use crate::utils::error::ExerciseError;

/// The GPU objects of one exercise, alive for the duration of its frame loop.
pub struct Scene<'a, A: ShaderApi> {
    exercise: Exercise,
    programs: Vec<ShaderProgram<'a, A>>,
    draws: Vec<(usize, Mesh)>,
}

impl<'a, A: ShaderApi> Scene<'a, A> {
    /// Builds every program and uploads every mesh of `plan`. The first
    /// failure aborts the build.
    pub fn build(api: &'a A, plan: &ExercisePlan) -> Result<Self, ExerciseError> {
        let exercise = plan.exercise;
        let programs = build_programs(api, plan).map_err(|source| ExerciseError::Shader {
            exercise,
            source,
        })?;

        let draws = plan
            .draws
            .iter()
            .map(|draw| Mesh::upload(&draw.mesh).map(|mesh| (draw.program, mesh)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ExerciseError::Mesh { exercise, source })?;

        log::info!(
            "Built {}: {} program(s), {} mesh(es)",
            exercise,
            programs.len(),
            draws.len()
        );

        Ok(Self {
            exercise,
            programs,
            draws,
        })
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn render(&self, config: &RenderConfig) {
        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::PolygonMode(
                gl::FRONT_AND_BACK,
                if config.wireframe { gl::LINE } else { gl::FILL },
            );
        }

        for (program, mesh) in &self.draws {
            self.programs[*program].set_used();
            mesh.draw();
        }
    }
}

/// Compiles and links the programs of `plan`, in order. A shader file shared
/// by several programs is read and compiled once.
pub fn build_programs<'a, A: ShaderApi>(
    api: &'a A,
    plan: &ExercisePlan,
) -> Result<Vec<ShaderProgram<'a, A>>, ShaderError> {
    let mut stages: HashMap<(PathBuf, ShaderStage), CompiledStage<'a, A>> = HashMap::new();

    for source in &plan.programs {
        for (path, stage) in [
            (&source.vertex, ShaderStage::Vertex),
            (&source.fragment, ShaderStage::Fragment),
        ] {
            let key = (path.clone(), stage);
            if !stages.contains_key(&key) {
                let compiled = compile_file(api, path, stage)?;
                stages.insert(key, compiled);
            }
        }
    }

    let mut programs = Vec::with_capacity(plan.programs.len());
    for source in &plan.programs {
        let vertex = &stages[&(source.vertex.clone(), ShaderStage::Vertex)];
        let fragment = &stages[&(source.fragment.clone(), ShaderStage::Fragment)];
        programs.push(shaders::link(api, vertex, fragment)?);
    }

    // Stages are released here; the linked programs keep their binaries.
    Ok(programs)
}

fn compile_file<'a, A: ShaderApi>(
    api: &'a A,
    path: &Path,
    stage: ShaderStage,
) -> Result<CompiledStage<'a, A>, ShaderError> {
    let source = shaders::load_source(path)?;
    shaders::compile(api, &source, stage)
}
