use clap::Parser;
use clap_verbosity_flag::Verbosity;

#[derive(Debug, Parser)]
#[clap(name = "brisk", version, about = "Fast and simple HTTP speed testing")]
pub(crate) struct App {
    /// HTTP remote URL for speed testing
    #[clap(short, long)]
    pub(crate) target: Option<String>,
    /// Number of parallel downloads
    #[clap(short, long, default_value_t = 4)]
    pub(crate) concurrent: u8,
    /// Stop the download after the given number of seconds
    #[clap(short, long, default_value_t = 0)]
    pub(crate) duration: u64,
    /// Display real-time progress bars
    #[clap(short, long)]
    pub(crate) progress: bool,
    #[clap(flatten)]
    pub(crate) verbose: Verbosity,
}

impl App {
    pub(crate) fn new() -> Self {
        Self::parse()
    }

    pub(crate) fn init_logging(&self) {
        pretty_env_logger::formatted_builder()
            .filter_level(self.verbose.log_level_filter())
            .init()
    }
}
