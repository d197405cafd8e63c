use exam_console::config::init_config;
use exam_console::{screens, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let state = AppState::new();
    screens::login::run(&state).await?;

    println!("Goodbye.");
    Ok(())
}
