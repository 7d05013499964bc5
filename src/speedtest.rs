use crate::counters::Counters;
#[cfg(feature = "progress")]
use crate::progress::Reporter;
use crate::ranges::{Range, Ranges};
use crate::target::Target;
use crate::{Error, Result};
use futures::future;
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Main type of the crate, downloads the target over concurrent ranged
/// requests and measures the achieved throughput
///
/// The run ends on whichever comes first: every worker finishing, the
/// optional time limit elapsing, or an interrupt signal. Workers still in
/// flight at cutoff or interrupt are left to the process teardown, their
/// requests are not cancelled.
#[derive(Debug)]
pub struct SpeedTest {
    client: Client,
    target: Target,
    workers: u8,
    counters: Counters,
    cutoff: Option<Duration>,
    #[cfg(feature = "progress")]
    progress: bool,
}

impl SpeedTest {
    /// Create a new speed test
    ///
    /// # Arguments
    /// * `url` - URL of the file
    /// * `workers` - amount of concurrent tasks
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use brisk::SpeedTest;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), brisk::Error> {
    /// let test = SpeedTest::new("https://speed.hetzner.de/100MB.bin", 4).await?;
    /// let result = test.run().await?;
    /// println!("{}", result);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub async fn new(url: &str, workers: u8) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        let client = Client::new();
        let target = Target::probe(url, &client).await?;
        Self::assemble(client, target, workers)
    }

    /// Assemble the test manually in case the server doesn't allow head requests
    pub fn new_manual(url: &str, workers: u8, length: u64) -> Result<Self> {
        Self::assemble(Client::new(), Target::manual(url, length)?, workers)
    }

    fn assemble(client: Client, target: Target, workers: u8) -> Result<Self> {
        // validate the plan up front so a bad worker count never launches
        Ranges::new(target.length(), workers)?;
        Ok(Self {
            client,
            target,
            workers,
            counters: Counters::new(workers),
            cutoff: None,
            #[cfg(feature = "progress")]
            progress: false,
        })
    }

    /// Declare the test done after the given time even if downloads are still running
    pub fn cutoff(&mut self, limit: Duration) -> &mut Self {
        self.cutoff = Some(limit);
        self
    }

    /// Enable progress reporting
    #[cfg(feature = "progress")]
    pub fn progress_bar(&mut self) -> &mut Self {
        self.progress = true;
        self
    }

    pub fn get_len(&self) -> u64 {
        self.target.length()
    }

    pub fn get_url(&self) -> String {
        self.target.url().to_string()
    }

    /// Run the test until completion, cutoff or interrupt, whichever fires first
    #[instrument(skip(self), fields(URL = %self.target.url(), tasks = %self.workers))]
    pub async fn run(self) -> Result<RunResult> {
        let ranges = Ranges::new(self.target.length(), self.workers)?.collect::<Vec<Range>>();
        debug!("File size: {}MB", self.target.length() / 1000000);

        #[cfg(feature = "progress")]
        let reporter = if self.progress {
            Some(Reporter::new(&ranges, self.counters.clone())?.spawn())
        } else {
            None
        };

        let started = Instant::now();
        let mut handles = Vec::with_capacity(ranges.len());
        for range in ranges {
            let client = self.client.clone();
            let url = self.target.url().clone();
            let counters = self.counters.clone();
            let part = range.index;
            handles.push(tokio::spawn(async move {
                if let Err(e) = range.fetch(client, url, counters).await {
                    error!("Failed to download part {}: {}", part, e);
                }
            }));
        }

        let outcome = tokio::select! {
            _ = future::join_all(handles) => Outcome::Completed,
            _ = cutoff_elapsed(self.cutoff) => Outcome::CutoffElapsed,
            _ = interrupted() => Outcome::Interrupted,
        };
        let elapsed = started.elapsed();
        info!("Test finished: {:?}", outcome);

        #[cfg(feature = "progress")]
        if let Some(handle) = reporter {
            handle.abort();
        }

        Ok(RunResult {
            url: self.target.url().to_string(),
            length: self.target.length(),
            workers: self.workers,
            elapsed,
            received: self.counters.total(),
            outcome,
        })
    }
}

/// Pends forever when no limit is configured
async fn cutoff_elapsed(limit: Option<Duration>) {
    match limit {
        Some(limit) => tokio::time::sleep(limit).await,
        None => future::pending().await,
    }
}

/// Resolves on SIGINT, and on SIGTERM where the platform has it
async fn interrupted() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install SIGINT handler: {}", e);
            future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                future::pending().await
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Which termination condition fired first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every worker ran to end-of-stream or error
    Completed,
    /// The configured time limit elapsed with downloads still in flight
    CutoffElapsed,
    /// An interrupt signal arrived
    Interrupted,
}

/// Final measurements of a run
#[derive(Debug, Clone)]
pub struct RunResult {
    url: String,
    length: u64,
    workers: u8,
    elapsed: Duration,
    received: u64,
    outcome: Outcome,
}

impl RunResult {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Bytes actually received across all workers, may fall short of the
    /// file size when a worker failed or the run was cut short
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Download speed in bytes per second, derived from the probed file size
    /// and the wall-clock time to whichever termination condition fired
    pub fn bytes_per_sec(&self) -> f64 {
        self.length as f64 / self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speed = self.bytes_per_sec();
        writeln!(f, "Summary:")?;
        writeln!(f, "File URL: {}", self.url)?;
        writeln!(f, "File Size: {} bytes", self.length)?;
        writeln!(f, "Concurrent Downloads: {}", self.workers)?;
        writeln!(f, "Download Time: {:.2?}", self.elapsed)?;
        write!(
            f,
            "Download Speed: {:.2} bytes/sec ({:.2} MB/sec)",
            speed,
            speed / (1024.0 * 1024.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(length: u64, secs: u64) -> RunResult {
        RunResult {
            url: "http://localhost/file.bin".to_string(),
            length,
            workers: 4,
            elapsed: Duration::from_secs(secs),
            received: length,
            outcome: Outcome::Completed,
        }
    }

    #[test]
    fn speed_derives_from_probed_size() {
        let res = result(4 * 1024 * 1024, 2);
        assert_eq!(res.bytes_per_sec(), 2097152.0);
    }

    #[test]
    fn summary_format() {
        let text = result(4 * 1024 * 1024, 2).to_string();
        assert!(text.contains("Summary:"));
        assert!(text.contains("File URL: http://localhost/file.bin"));
        assert!(text.contains("File Size: 4194304 bytes"));
        assert!(text.contains("Concurrent Downloads: 4"));
        assert!(text.contains("Download Time: 2.00s"));
        assert!(text.contains("Download Speed: 2097152.00 bytes/sec (2.00 MB/sec)"));
    }
}
