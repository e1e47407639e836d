use async_trait::async_trait;
use crate::{RawRecord, ReportError};

/// Source of raw per-symbol attribute bags.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the raw record for `symbol`. Any field may be missing from the result.
    async fn fetch(&self, symbol: &str) -> Result<RawRecord, ReportError>;
}
