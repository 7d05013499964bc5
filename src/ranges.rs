use crate::counters::Counters;
use crate::{Error, Result};
use reqwest::header::RANGE;
use reqwest::{Client, Url};
use tracing::instrument;

/// Iterator over the byte ranges assigned to the download workers
///
/// Splits `[0, length)` into `workers` contiguous ranges. The boundaries
/// truncate under integer division, so the last range absorbs the remainder
/// and always ends at the final byte of the resource.
#[derive(Debug, Clone, Copy)]
pub struct Ranges {
    length: u64,
    workers: u64,
    next: u64,
}

impl Ranges {
    /// Create the iterator
    /// # Arguments
    /// * `length` - total size of the resource in bytes
    /// * `workers` - amount of concurrent tasks
    pub fn new(length: u64, workers: u8) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Self {
            length,
            workers: workers as u64,
            next: 0,
        })
    }
}

impl Iterator for Ranges {
    type Item = Range;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.workers {
            None
        } else {
            let part = self.next;
            self.next += 1;
            let low = part * self.length / self.workers;
            let hi = ((part + 1) * self.length / self.workers).saturating_sub(1);
            Some(Range {
                index: part as usize,
                low,
                hi,
            })
        }
    }
}

/// One worker's byte range, inclusive on both ends
#[derive(Debug, Clone, Copy)]
pub struct Range {
    pub index: usize,
    pub low: u64,
    pub hi: u64,
}

impl Range {
    /// Formatted [`RANGE`][reqwest::header::RANGE] header value
    pub fn header(&self) -> String {
        format!("bytes={}-{}", self.low, self.hi)
    }

    /// Planned amount of bytes for this worker
    pub fn len(&self) -> u64 {
        self.hi - self.low + 1
    }

    /// Stream this range from the server, counting every chunk as it arrives.
    /// Returns the amount of bytes received before end-of-stream or error.
    #[instrument(skip(client, counters), fields(range = %self.header()))]
    pub(crate) async fn fetch(self, client: Client, url: Url, counters: Counters) -> Result<u64> {
        let mut resp = client.get(url).header(RANGE, self.header()).send().await?;
        let mut received = 0;
        while let Some(chunk) = resp.chunk().await? {
            counters.add(self.index, chunk.len() as u64);
            received += chunk.len() as u64;
        }
        Ok(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_evenly() {
        let ranges: Vec<Range> = Ranges::new(100, 4).unwrap().collect();
        assert_eq!(ranges.len(), 4);
        assert_eq!((ranges[0].low, ranges[0].hi), (0, 24));
        assert_eq!((ranges[1].low, ranges[1].hi), (25, 49));
        assert_eq!((ranges[2].low, ranges[2].hi), (50, 74));
        assert_eq!((ranges[3].low, ranges[3].hi), (75, 99));
    }

    // 10 bytes over 3 workers: the shares truncate to 3 bytes but the final
    // range still ends at byte 9, so nothing is left unrequested
    #[test]
    fn last_range_absorbs_remainder() {
        let ranges: Vec<Range> = Ranges::new(10, 3).unwrap().collect();
        assert_eq!((ranges[0].low, ranges[0].hi), (0, 2));
        assert_eq!((ranges[1].low, ranges[1].hi), (3, 5));
        assert_eq!((ranges[2].low, ranges[2].hi), (6, 9));
        assert_eq!(ranges.iter().map(Range::len).sum::<u64>(), 10);
    }

    #[test]
    fn ranges_partition_the_resource() {
        for &(length, workers) in &[(1u64, 1u8), (10, 3), (1000, 7), (1024, 4), (65536, 255)] {
            let ranges: Vec<Range> = Ranges::new(length, workers).unwrap().collect();
            assert_eq!(ranges.len(), workers as usize);
            assert_eq!(ranges[0].low, 0);
            for pair in ranges.windows(2) {
                assert_eq!(pair[1].low, pair[0].hi + 1);
            }
            assert_eq!(ranges.last().unwrap().hi, length - 1);
            assert_eq!(ranges.iter().map(Range::len).sum::<u64>(), length);
        }
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(Ranges::new(1024, 0).is_err());
    }

    #[test]
    fn header_format() {
        let range = Range {
            index: 1,
            low: 3,
            hi: 5,
        };
        assert_eq!(range.header(), "bytes=3-5");
        assert_eq!(range.len(), 3);
    }
}
