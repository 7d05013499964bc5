use crate::counters::Counters;
use crate::ranges::Range;
use crate::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Per-worker progress bars fed from the shared counters on a fixed tick
#[derive(Debug)]
pub(crate) struct Reporter {
    bars: Vec<ProgressBar>,
    counters: Counters,
}

impl Reporter {
    /// Build one bar per worker, sized to that worker's planned range
    pub(crate) fn new(ranges: &[Range], counters: Counters) -> Result<Self> {
        let style = ProgressStyle::with_template("Part {prefix}: [{bar:40}] {percent:>3}%")?
            .progress_chars("=> ");
        let multi = MultiProgress::new();
        let bars = ranges
            .iter()
            .map(|range| {
                let bar = multi.add(ProgressBar::new(range.len()));
                bar.set_style(style.clone());
                bar.set_prefix(range.index.to_string());
                bar
            })
            .collect();
        Ok(Self { bars, counters })
    }

    /// Start the tick task, refreshing every bar from the counters once a second
    pub(crate) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            loop {
                tick.tick().await;
                for (part, bar) in self.bars.iter().enumerate() {
                    bar.set_position(self.counters.get(part));
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::Ranges;

    #[test]
    fn bars_match_planned_ranges() {
        let ranges: Vec<Range> = Ranges::new(100, 4).unwrap().collect();
        let reporter = Reporter::new(&ranges, Counters::new(4)).unwrap();
        assert_eq!(reporter.bars.len(), 4);
        for bar in &reporter.bars {
            assert_eq!(bar.length(), Some(25));
        }
    }

    // 10 bytes over 3 workers: the last bar covers the 4-byte remainder range
    // so a fully downloaded part reads 100%, never more
    #[test]
    fn remainder_goes_to_the_last_bar() {
        let ranges: Vec<Range> = Ranges::new(10, 3).unwrap().collect();
        let reporter = Reporter::new(&ranges, Counters::new(3)).unwrap();
        assert_eq!(reporter.bars[2].length(), Some(4));
    }
}
