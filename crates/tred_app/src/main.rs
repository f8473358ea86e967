use anyhow::{anyhow, Result};
use tracing::warn;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use tred_app::app::{demo_catalog, launch};
use tred_app::prefs::load_comment_prefs;
use tred_core::appearance::CommentSettings;

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let settings = load_comment_prefs().unwrap_or_else(|err| {
        warn!(%err, "ignoring comment preferences");
        CommentSettings::default()
    });

    launch(demo_catalog(), settings).map_err(|err| anyhow!("desktop shell failed: {err}"))
}
