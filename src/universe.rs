//! # Asset Universe
//!
//! Ordered list of asset identifiers; positions index every vector and
//! matrix in the crate. Fixed once constructed.

use crate::error::QuboError;
use crate::error::Result;

/// Ordered set of asset tickers, immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetUniverse {
  tickers: Vec<String>,
}

impl AssetUniverse {
  /// Build a universe from an ordered ticker list.
  pub fn new<I, S>(tickers: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let tickers: Vec<String> = tickers.into_iter().map(Into::into).collect();
    if tickers.is_empty() {
      return Err(QuboError::InvalidParameter(
        "asset universe cannot be empty".to_string(),
      ));
    }
    Ok(Self { tickers })
  }

  /// Number of assets.
  pub fn len(&self) -> usize {
    self.tickers.len()
  }

  /// True when the universe holds no assets.
  pub fn is_empty(&self) -> bool {
    self.tickers.is_empty()
  }

  /// Tickers in position order.
  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Ticker at a given position.
  pub fn ticker(&self, position: usize) -> Option<&str> {
    self.tickers.get(position).map(String::as_str)
  }

  /// Position of a ticker, if present.
  pub fn position(&self, ticker: &str) -> Option<usize> {
    self.tickers.iter().position(|t| t == ticker)
  }
}
