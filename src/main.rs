use anyhow::Result;
use clap::Parser;
use lesson_plan_generator::app::LessonPlanner;
use lesson_plan_generator::models::{Config, GenerationState, LessonDuration, LessonForm};
use lesson_plan_generator::render::render;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lesson-planner")]
#[command(about = "Generate a lesson plan from reference documents")]
struct CliArgs {
    /// Lesson topic, e.g. "Quang hợp ở thực vật".
    #[arg(short, long)]
    topic: String,

    /// Lesson duration in minutes.
    #[arg(short, long, value_enum, default_value_t = LessonDuration::Minutes45)]
    duration: LessonDuration,

    /// Reference documents to attach (at least one).
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Directory for the exported document (defaults to OUTPUT_DIR or ./output).
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip writing the Word document.
    #[arg(long)]
    no_export: bool,

    /// Print rendered markup instead of the raw plan text.
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lesson_plan_generator=info,lesson_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting lesson-planner");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut planner = LessonPlanner::from_config(&config, args.output_dir.clone());
    let form = LessonForm {
        topic: args.topic,
        duration: args.duration,
        files: args.files,
    };

    match planner.generate(&form).await {
        Ok(GenerationState::Success(result)) => {
            if args.html {
                println!("{}", render(&result.raw_text));
            } else {
                println!("{}", result.raw_text);
            }
        }
        Ok(GenerationState::Failure(message)) => {
            error!("{}", message);
            std::process::exit(1);
        }
        Ok(other) => {
            error!("Generation ended in unexpected state: {:?}", other);
            std::process::exit(1);
        }
        Err(e) => {
            warn!("{}", e);
            error!("{}", e.user_message());
            std::process::exit(1);
        }
    }

    if args.no_export {
        info!("Export skipped");
        return Ok(());
    }

    match planner.download().await? {
        Some(path) => info!("Saved lesson plan to {}", path.display()),
        None => warn!("Nothing to export"),
    }

    Ok(())
}
