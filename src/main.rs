use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use safety_quiz::{Config, Quiz};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// How long answer feedback stays on screen before the next question, in milliseconds
    #[arg(long, default_value_t = 2000)]
    feedback_delay_ms: u64,

    /// Directory for the log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::new(Duration::from_millis(args.feedback_delay_ms), args.log_dir);

    // The TUI owns stdout, so logs only go to the file.
    let _guard = init_logging(&config);

    let result = match Quiz::builtin(&config) {
        Ok(quiz) => quiz.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("quiz failed: {}", e);
            eprintln!("Error running quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "safety-quiz.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.log_filter);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}
