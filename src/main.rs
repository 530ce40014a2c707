use anyhow::{bail, Context, Result};
use log::info;
use simple_logger::SimpleLogger;
use std::{path::PathBuf, process::ExitCode};
use winit::event_loop::EventLoopBuilder;

use trigl::{
    config::core::{default_config_path, AppConfig},
    exercises::Exercise,
    render::context::RenderContext,
    run_exercises,
};

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    list: bool,
    exercises: Vec<Exercise>,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--list" => parsed.list = true,
                flag if flag.starts_with("--") => bail!("Unknown option {}", flag),
                name => parsed.exercises.push(name.parse()?),
            }
        }

        Ok(parsed)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse(std::env::args().skip(1))?;

    if args.list {
        for exercise in Exercise::ALL {
            println!("{:<18} {}", exercise.name(), exercise.description());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = AppConfig::load_or_create(&config_path)?;

    SimpleLogger::new().with_level(config.level_filter()).init()?;
    info!("Loaded configuration from {:?}", config_path);

    let exercises = if args.exercises.is_empty() {
        config.exercises.clone()
    } else {
        args.exercises
    };
    if exercises.is_empty() {
        bail!("No exercises selected");
    }

    let mut event_loop = EventLoopBuilder::new().build()?;
    let context = RenderContext::new(&event_loop, &config.window, &config.render)?;

    let summary = run_exercises(&mut event_loop, &context, &config, &exercises)?;
    info!(
        "{} completed, {} failed, {} skipped",
        summary.completed.len(),
        summary.failed.len(),
        summary.skipped.len()
    );

    // Release the context and window before reporting the status.
    drop(context);
    Ok(ExitCode::from(summary.exit_code()))
}
