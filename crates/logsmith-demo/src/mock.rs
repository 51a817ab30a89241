#![forbid(unsafe_code)]

//! Deterministic mock log data.
//!
//! Entry `i` is stamped `i * 500ms` before `now`, gets a pseudo-random level,
//! and carries a message of the form
//! `"{LEVEL} event #{i} user:{(i % 37) + 1} payload={base36}"`.
//! The same seed always yields the same levels and payloads.

use logsmith::{Dataset, LogEntry, LogLevel};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Spacing between consecutive entries.
pub const ENTRY_SPACING_MS: i64 = 500;

const PAYLOAD_LEN: usize = 11;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// xorshift64 generator.
#[derive(Debug, Clone)]
pub struct MockRng {
    state: u64,
}

impl MockRng {
    /// Seeded generator. Seed 0 is remapped so the state never sticks at zero.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15) | 1,
        }
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn level(&mut self) -> LogLevel {
        LogLevel::ALL[(self.next_u64() % LogLevel::ALL.len() as u64) as usize]
    }

    fn payload(&mut self) -> String {
        let mut n = self.next_u64();
        let mut out = String::with_capacity(PAYLOAD_LEN);
        for _ in 0..PAYLOAD_LEN {
            out.push(char::from(BASE36[(n % 36) as usize]));
            n /= 36;
        }
        out
    }
}

/// RFC 3339 timestamp, or the epoch if formatting fails.
#[must_use]
pub fn timestamp_rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Generate `n` entries going back in time from `now`.
#[must_use]
pub fn generate(n: usize, seed: u64, now: OffsetDateTime) -> Vec<LogEntry> {
    let mut rng = MockRng::new(seed);
    let now = now.replace_nanosecond(0).unwrap_or(now);
    (0..n)
        .map(|i| {
            let level = rng.level();
            let message = format!(
                "{level} event #{i} user:{} payload={}",
                (i % 37) + 1,
                rng.payload()
            );
            let at = now - Duration::milliseconds(ENTRY_SPACING_MS.saturating_mul(i as i64));
            LogEntry::new(i as u64, timestamp_rfc3339(at), level, message)
        })
        .collect()
}

/// Generate a dataset stamped relative to the current time.
#[must_use]
pub fn dataset(n: usize, seed: u64) -> Dataset {
    let _span = tracing::info_span!("logsmith.mock", rows = n, seed).entered();
    let dataset = Dataset::new(generate(n, seed, OffsetDateTime::now_utc()));
    tracing::info!("mock dataset ready");
    dataset
}
