use clap::Parser;
use joplin_launcher::config::Config;
use joplin_launcher::extension::{Extension, KEYWORDS};
use joplin_launcher::joplin::JoplinClient;
use joplin_launcher::settings::{preferences_path, JsonPreferenceStore, Preferences};
use joplin_launcher::{host, logging};
use std::path::PathBuf;

/// Joplin launcher extension: serves host events on stdin/stdout.
#[derive(Parser)]
#[command(name = "joplin_launcher", version)]
#[command(about = "File Joplin notes and to-dos from a launcher", long_about = None)]
struct Cli {
    /// Preference file (defaults to $JOPLIN_LAUNCHER_PREFS or the config dir)
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Enable debug logging; RUST_LOG may then refine the filter
    #[arg(long)]
    debug: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _guard = logging::init(args.debug, args.log_file.as_deref());

    let prefs_path = preferences_path(args.prefs);
    let prefs = match Preferences::load(&prefs_path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("using default preferences: {e:#}");
            Preferences::default()
        }
    };
    let config = Config::from_preferences(&prefs);
    tracing::info!(
        server = %config.server,
        prefs = %prefs_path.display(),
        keywords = ?KEYWORDS,
        "joplin launcher extension starting"
    );

    let mut ext = Extension::new(
        config,
        JoplinClient::new()?,
        JsonPreferenceStore::new(prefs_path),
    );
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    host::run(&mut ext, stdin.lock(), stdout.lock())
}
