use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use gitlith::app::App;
use gitlith::config::{self, Config};
use gitlith::git::GitRepo;
use gitlith::{logging, runtime};

fn main() -> Result<()> {
    // Logging is best effort: the dashboard still runs without it
    let _guard = match config::ensure_directories()
        .and_then(|()| logging::init_file_logging(config::logs_dir()))
    {
        Ok((log_file_info, guard)) => {
            if let Ok(count) = logging::cleanup_old_logs(&config::logs_dir()) {
                if count > 0 {
                    tracing::info!("Cleaned up {} old log files", count);
                }
            }
            tracing::info!("Logging to: {}", log_file_info.path.display());
            Some(guard)
        }
        Err(e) => {
            eprintln!("gitlith: logging disabled: {:#}", e);
            None
        }
    };

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    let repo_path = config.resolve_repo_path().unwrap_or_else(|e| {
        tracing::warn!("{:#}, using '.'", e);
        PathBuf::from(".")
    });
    let repo = GitRepo::new(&repo_path);

    let rt = runtime::build()?;
    let result = rt.block_on(async {
        let mut app = App::new(config, Arc::new(repo)).await?;
        app.run().await
    });
    // Do not wait for a git call that is still running after quit
    runtime::shutdown(rt);
    result
}
