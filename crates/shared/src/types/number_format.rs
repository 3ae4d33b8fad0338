//! Number format hints for report renderers.
//!
//! The engine never formats amounts itself. These hints travel with the
//! report metadata so every renderer (table, spreadsheet, PDF) applies the
//! same rules.

use serde::{Deserialize, Serialize};

/// Largest scale a decimal amount can carry.
pub const MAX_SCALE: u32 = 28;

/// Which rows get a currency symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMoney {
    /// Every amount carries the currency symbol.
    Always,
    /// Only total rows carry the currency symbol.
    #[default]
    Total,
    /// Amounts are rendered as plain numbers.
    None,
}

/// How negative amounts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeFormat {
    /// `-100.00`
    #[default]
    Mines,
    /// `(100.00)`
    Parentheses,
}

/// Number format requested by the report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberFormat {
    /// Digits after the decimal separator.
    pub precision: u32,
    /// Render amounts in thousands.
    pub divide_on_1000: bool,
    /// Render zero amounts instead of leaving the cell blank.
    pub show_zero: bool,
    /// Currency symbol placement.
    pub format_money: FormatMoney,
    /// Negative amount style.
    pub negative_format: NegativeFormat,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            divide_on_1000: false,
            show_zero: false,
            format_money: FormatMoney::default(),
            negative_format: NegativeFormat::default(),
        }
    }
}

impl NumberFormat {
    /// Returns the rounding scale a renderer should apply to amounts.
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.precision.min(MAX_SCALE)
    }
}
