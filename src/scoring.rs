// 🎯 Scoring Engine - Receipt → points
// Seven independent rules, summed. Pure: no shared state, no I/O.

use crate::money::Cents;
use crate::receipt::Receipt;
use chrono::{Datelike, NaiveTime, Timelike};
use serde::Serialize;
use thiserror::Error;

pub const RETAILER_CHAR_POINTS: u64 = 1;
pub const ROUND_TOTAL_POINTS: u64 = 50;
pub const QUARTER_TOTAL_POINTS: u64 = 25;
pub const ITEM_PAIR_POINTS: u64 = 5;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

/// Window for the afternoon bonus, both ends exclusive.
const AFTERNOON_START: (u32, u32) = (14, 0);
const AFTERNOON_END: (u32, u32) = (16, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("problem parsing purchaseDate '{0}' for this receipt")]
    DateParse(String),

    #[error("problem parsing purchaseTime '{0}' for this receipt")]
    TimeParse(String),
}

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Points awarded by each rule for one receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_total: u64,
    pub quarter_total: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.retailer_name
            + self.round_total
            + self.quarter_total
            + self.item_pairs
            + self.item_descriptions
            + self.odd_day
            + self.afternoon
    }

    /// (rule name, points) pairs in rule order, for display.
    pub fn rules(&self) -> [(&'static str, u64); 7] {
        [
            ("retailer name", self.retailer_name),
            ("round dollar total", self.round_total),
            ("total multiple of 0.25", self.quarter_total),
            ("item pairs", self.item_pairs),
            ("item descriptions", self.item_descriptions),
            ("odd purchase day", self.odd_day),
            ("2pm-4pm purchase", self.afternoon),
        ]
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Total points for a receipt.
pub fn score(receipt: &Receipt) -> Result<u64, ScoringError> {
    breakdown(receipt).map(|b| b.total())
}

/// Per-rule points for a receipt.
///
/// Fails only when the date or time does not match its fixed layout, which
/// the boundary is expected to have rejected already.
pub fn breakdown(receipt: &Receipt) -> Result<PointsBreakdown, ScoringError> {
    let date = receipt
        .parsed_date()
        .ok_or_else(|| ScoringError::DateParse(receipt.purchase_date.clone()))?;
    let time = receipt
        .parsed_time()
        .ok_or_else(|| ScoringError::TimeParse(receipt.purchase_time.clone()))?;

    Ok(PointsBreakdown {
        retailer_name: retailer_points(&receipt.retailer),
        round_total: if receipt.total.is_whole() { ROUND_TOTAL_POINTS } else { 0 },
        quarter_total: if receipt.total.is_multiple_of(25) { QUARTER_TOTAL_POINTS } else { 0 },
        item_pairs: ITEM_PAIR_POINTS * (receipt.items.len() as u64 / 2),
        item_descriptions: receipt
            .items
            .iter()
            .map(|item| description_points(item.trimmed_description(), item.price))
            .sum(),
        odd_day: if date.day() % 2 == 1 { ODD_DAY_POINTS } else { 0 },
        afternoon: if in_afternoon_window(time) { AFTERNOON_POINTS } else { 0 },
    })
}

// Alphabetic also covers combining vowel signs (Other_Alphabetic) that a
// strict letter-category check would skip; std exposes no general category.
fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64 * RETAILER_CHAR_POINTS
}

/// ceil(price * 0.2) when the trimmed description's UTF-8 byte length is a
/// non-zero multiple of 3.
fn description_points(trimmed: &str, price: Cents) -> u64 {
    let len = trimmed.len();
    if len == 0 || len % 3 != 0 {
        return 0;
    }
    price.ceil_ratio(1, 5)
}

fn in_afternoon_window(time: NaiveTime) -> bool {
    let minutes = |(h, m): (u32, u32)| h * 60 + m;
    let at = minutes((time.hour(), time.minute()));
    at > minutes(AFTERNOON_START) && at < minutes(AFTERNOON_END)
}

// ============================================================================
// TESTS
// ============================================================================
