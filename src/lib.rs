//! Fast and simple HTTP speed testing
//!
//! Measures achievable download throughput against a remote resource by
//! splitting it into contiguous byte ranges and fetching them over multiple
//! async connections while counting the bytes each worker receives
//!
//! The crate exposes debug logs through the [`tracing`][tracing] crate
//!
//! ## Feature flags
//!
//! - `progress`: Enables progress reporting using `indicatif`
//! - `rustls`: Use rustls for TLS (default)
//! - `openssl`: Use the platform native TLS
//!
//! ## Crate usage
//!
//! # Example
//!
//! ```no_run
//! use brisk::SpeedTest;
//! #[tokio::main]
//! async fn main() -> Result<(), brisk::Error> {
//!     let number_of_concurrent_tasks: u8 = 5;
//!     let test = SpeedTest::new("https://speed.hetzner.de/100MB.bin", number_of_concurrent_tasks).await?;
//!     let result = test.run().await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

mod counters;
mod error;
#[cfg(feature = "progress")]
mod progress;
mod ranges;
mod speedtest;
mod target;

pub use counters::Counters;
pub use error::{Error, Result};
pub use ranges::{Range, Ranges};
pub use reqwest::{header, Client, Url};
pub use speedtest::{Outcome, RunResult, SpeedTest};
pub use target::Target;
