//! Quote sheets: the mapping from asset code to observed price.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single observed price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Price in USD.
    pub value: f64,
    /// Unix timestamp of the observation.
    pub when: i64,
}

/// All quotes gathered in one polling pass, keyed by asset code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSheet {
    quotes: BTreeMap<String, Quote>,
}

impl QuoteSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote for `code`, replacing any earlier one.
    pub fn insert(&mut self, code: impl Into<String>, quote: Quote) {
        self.quotes.insert(code.into(), quote);
    }

    /// Look up the quote for `code`.
    pub fn get(&self, code: &str) -> Option<Quote> {
        self.quotes.get(code).copied()
    }

    /// Number of quoted assets.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the sheet holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// The contract exposed to the engine: asset code to price.
    pub fn prices(&self) -> BTreeMap<String, f64> {
        self.quotes
            .iter()
            .map(|(code, quote)| (code.clone(), quote.value))
            .collect()
    }

    /// Clone the sheet with a bounded random perturbation on every value.
    ///
    /// Used in test and development setups to make independently running
    /// nodes disagree slightly. `randomize <= 0` returns an exact clone.
    /// Each value moves by at most `value * randomize / 2` in either
    /// direction and is rounded to 8 decimals; timestamps are preserved.
    pub fn jittered(&self, randomize: f64) -> QuoteSheet {
        if randomize <= 0.0 {
            return self.clone();
        }
        let mut rng = rand::thread_rng();
        let quotes = self
            .quotes
            .iter()
            .map(|(code, quote)| {
                let up: f64 = rand::Rng::gen(&mut rng);
                let down: f64 = rand::Rng::gen(&mut rng);
                let value = quote.value + quote.value * (randomize / 2.0) * up
                    - quote.value * (randomize / 2.0) * down;
                (
                    code.clone(),
                    Quote {
                        value: round_to_8(value),
                        when: quote.when,
                    },
                )
            })
            .collect();
        QuoteSheet { quotes }
    }
}

/// Round to 8 decimal places.
pub fn round_to_8(v: f64) -> f64 {
    (v * 1e8).round() / 1e8
}

/// Truncate toward zero at 4 decimal places.
pub fn truncate_to_4(v: f64) -> f64 {
    f64::trunc(v * 1e4) / 1e4
}

/// Truncate toward zero at 8 decimal places.
pub fn truncate_to_8(v: f64) -> f64 {
    f64::trunc(v * 1e8) / 1e8
}
