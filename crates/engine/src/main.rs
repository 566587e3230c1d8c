//! Glimpse - demo entry point.
//!
//! Loads the seeded in-memory app, prints a feed summary, then plays every
//! story through the viewer until it closes. Keys from `GLIMPSE_DEMO_KEYS`
//! are pressed one per story shown; without them the viewer autoplays.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glimpse_engine::infrastructure::settings::AppSettings;
use glimpse_domain::NavigationInput;
use glimpse_engine::use_cases::ViewerEvent;
use glimpse_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glimpse_engine=debug,glimpse=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Glimpse");

    let settings = AppSettings::from_env();
    let app = App::from_settings(settings)?;
    let use_cases = &app.use_cases;

    let me = use_cases.current_user.get().await?;
    let posts = use_cases.feed.list().await?;
    let digest = use_cases.activity.digest().await?;
    tracing::info!(
        user = %me.username,
        posts = posts.len(),
        unread = digest.unread_count,
        badge = digest.badge().as_deref().unwrap_or(""),
        "Feed loaded"
    );
    for post in &posts {
        tracing::info!(
            author = %post.author.username,
            likes = post.like_count(),
            comments = post.comments.len(),
            "{}",
            post.caption
        );
    }

    let stories = use_cases.stories.list().await?;
    if stories.is_empty() {
        tracing::info!("No stories to play");
        return Ok(());
    }

    let mut keys = app.settings.demo_keys.iter().copied();
    let mut viewer = use_cases.viewer.open(stories, 0)?;
    while let Some(event) = viewer.next_event().await {
        match event {
            // No real media here, so every image "loads" as soon as it is shown.
            ViewerEvent::Opened { index, story_id }
            | ViewerEvent::IndexChanged {
                to: index,
                story_id,
                ..
            } => {
                tracing::info!(index, %story_id, "Showing story");
                viewer.media_loaded(story_id);
                if let Some(key) = keys.next() {
                    tracing::info!(?key, "Pressing key");
                    viewer.input(NavigationInput::KeyPress(key));
                }
            }
            ViewerEvent::Closed(_) => break,
            _ => {}
        }
    }

    let report = viewer.finished().await?;
    tracing::info!(
        reason = %report.reason,
        viewed = report.viewed.len(),
        "Story viewer closed"
    );
    if report.all_viewed() {
        tracing::info!("All stories viewed!");
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
