use crate::domain::result::{DomainError, DomainResult};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NO_CACHE: &str = "no-cache";
const MAX_AGE_PREFIX: &str = "max-age=";

/// Advisory hint telling downstream caches how long a response may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDirective {
    /// The response must not be cached.
    NoCache,
    /// The response may be reused for the given number of seconds.
    MaxAge(u64),
}

impl CacheDirective {
    pub fn max_age(duration: Duration) -> Self {
        CacheDirective::MaxAge(duration.as_secs())
    }

    pub fn is_cacheable(&self) -> bool {
        matches!(self, CacheDirective::MaxAge(secs) if *secs > 0)
    }

    /// How long the response may be reused, `None` if it must not be cached.
    pub fn max_age_duration(&self) -> Option<Duration> {
        match self {
            CacheDirective::NoCache => None,
            CacheDirective::MaxAge(secs) => Some(Duration::from_secs(*secs)),
        }
    }
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheDirective::NoCache => f.write_str(NO_CACHE),
            CacheDirective::MaxAge(secs) => write!(f, "{MAX_AGE_PREFIX}{secs}"),
        }
    }
}

impl FromStr for CacheDirective {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        let value = value.trim();

        if value.eq_ignore_ascii_case(NO_CACHE) {
            return Ok(CacheDirective::NoCache);
        }

        let secs = value
            .get(..MAX_AGE_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(MAX_AGE_PREFIX))
            .map(|_| &value[MAX_AGE_PREFIX.len()..])
            .ok_or_else(|| DomainError::InvalidCacheDirective(value.to_string()))?;

        secs.parse::<u64>()
            .map(CacheDirective::MaxAge)
            .map_err(|_| DomainError::InvalidCacheDirective(value.to_string()))
    }
}
