mod app;

use crate::app::App;
use anyhow::Result;
use brisk::{Error, Outcome, SpeedTest};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::new();
    app.init_logging();
    let target = app
        .target
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingTarget)?;
    let mut test = SpeedTest::new(target, app.concurrent).await?;
    if app.duration > 0 {
        test.cutoff(Duration::from_secs(app.duration));
    }
    #[cfg(feature = "progress")]
    if app.progress {
        test.progress_bar();
    }
    let result = test.run().await?;
    if result.outcome() == Outcome::Interrupted {
        println!("\nInterrupt signal received. Stopping the test...");
    }
    println!("{}", result);
    Ok(())
}
