use log::{error, info};
use winit::{
    error::EventLoopError,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    platform::run_on_demand::EventLoopExtRunOnDemand,
};

use crate::config::{AppConfig, RenderConfig};
use crate::exercises::{Exercise, Scene};
use crate::input::{CloseReason, FrameInput};
use crate::render::api::{GlApi, ShaderApi};
use crate::render::context::RenderContext;
use crate::utils::error::ExerciseError;

/// Outcome of running a list of exercises.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<Exercise>,
    pub failed: Vec<(Exercise, String)>,
    /// Exercises never started because the window was closed.
    pub skipped: Vec<Exercise>,
}

impl RunSummary {
    pub fn record_failure(&mut self, err: &ExerciseError) {
        error!("An error occurred. {}", err);
        self.failed.push((err.exercise(), err.to_string()));
    }

    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Runs each exercise in turn on the shared window. A build failure is logged
/// and recorded; the remaining exercises still run.
pub fn run_exercises(
    event_loop: &mut EventLoop<()>,
    context: &RenderContext,
    config: &AppConfig,
    exercises: &[Exercise],
) -> Result<RunSummary, EventLoopError> {
    let api = GlApi;
    let mut summary = RunSummary::default();

    for (n, &exercise) in exercises.iter().enumerate() {
        info!("Running {} ({})", exercise, exercise.description());
        context
            .window()
            .set_title(&format!("{} - {}", config.window.title, exercise));

        let plan = exercise.plan(&config.shaders);
        let scene = match Scene::build(&api, &plan) {
            Ok(scene) => scene,
            Err(e) => {
                summary.record_failure(&e);
                continue;
            }
        };

        let reason = run_frame_loop(event_loop, context, &scene, &config.render)?;
        info!("Finished {}", scene.exercise());
        summary.completed.push(exercise);

        if reason == CloseReason::WindowClosed {
            summary.skipped.extend_from_slice(&exercises[n + 1..]);
            break;
        }
    }

    Ok(summary)
}

/// Poll input, clear, draw, present; until the close flag is raised.
fn run_frame_loop<A: ShaderApi>(
    event_loop: &mut EventLoop<()>,
    context: &RenderContext,
    scene: &Scene<'_, A>,
    render: &RenderConfig,
) -> Result<CloseReason, EventLoopError> {
    let mut input = FrameInput::default();

    event_loop.run_on_demand(|event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => input.handle_close_requested(),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state,
                            repeat,
                            ..
                        },
                    ..
                } => input.handle_key(key, state == ElementState::Pressed, repeat),
                WindowEvent::Resized(size) => context.resize(size),
                WindowEvent::RedrawRequested => {
                    scene.render(render);
                    if let Err(e) = context.swap_buffers() {
                        error!("Failed to present frame: {}", e);
                    }
                }
                _ => (),
            },
            Event::AboutToWait => context.window().request_redraw(),
            _ => (),
        }

        if input.should_close() {
            elwt.exit();
        }
    })?;

    Ok(input.close_reason().unwrap_or(CloseReason::WindowClosed))
}
