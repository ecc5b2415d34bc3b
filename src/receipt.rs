// 🧾 Receipt Model - Shape of a submitted purchase
// Validates receipts at the boundary so the scoring engine only sees
// well-formed dates, times and items.

use crate::money::Cents;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

// ============================================================================
// RECEIPT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Store name as printed on the receipt
    pub retailer: String,

    /// `YYYY-MM-DD`
    pub purchase_date: String,

    /// `HH:MM`, 24-hour clock
    pub purchase_time: String,

    pub items: Vec<Item>,

    pub total: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// May carry surrounding whitespace; scoring trims it
    pub short_description: String,

    pub price: Cents,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: Cents) -> Self {
        Item {
            short_description: short_description.into(),
            price,
        }
    }

    pub fn trimmed_description(&self) -> &str {
        self.short_description.trim()
    }
}

impl Receipt {
    /// Parse `purchase_date`, `None` unless it is exactly `YYYY-MM-DD` and a real date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_purchase_date(&self.purchase_date)
    }

    /// Parse `purchase_time`, `None` unless it is exactly `HH:MM`.
    pub fn parsed_time(&self) -> Option<NaiveTime> {
        parse_purchase_time(&self.purchase_time)
    }

    /// Check everything serde cannot: non-empty text, non-empty items,
    /// and the fixed date/time layouts.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.retailer.is_empty() {
            errors.push(ValidationError::new(FIELD_RETAILER, "Required field is empty"));
        }

        if self.items.is_empty() {
            errors.push(ValidationError::new(FIELD_ITEMS, "At least one item is required"));
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.short_description.is_empty() {
                errors.push(ValidationError::new(
                    FIELD_SHORT_DESCRIPTION,
                    &format!("Item {} has an empty description", idx),
                ));
            }
        }

        if self.parsed_date().is_none() {
            errors.push(ValidationError::new(
                FIELD_PURCHASE_DATE,
                &format!("'{}' is not a YYYY-MM-DD date", self.purchase_date),
            ));
        }

        if self.parsed_time().is_none() {
            errors.push(ValidationError::new(
                FIELD_PURCHASE_TIME,
                &format!("'{}' is not an HH:MM time", self.purchase_time),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    // chrono's %Y alone would take "20-01-01" as year 20
    if !matches_layout(raw, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn parse_purchase_time(raw: &str) -> Option<NaiveTime> {
    if !matches_layout(raw, "dd:dd") {
        return None;
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
}

/// `d` in the layout stands for one ASCII digit, everything else is literal.
fn matches_layout(raw: &str, layout: &str) -> bool {
    raw.len() == layout.len()
        && raw.bytes().zip(layout.bytes()).all(|(c, l)| match l {
            b'd' => c.is_ascii_digit(),
            _ => c == l,
        })
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

pub const FIELD_RETAILER: &str = "retailer";
pub const FIELD_PURCHASE_DATE: &str = "purchaseDate";
pub const FIELD_PURCHASE_TIME: &str = "purchaseTime";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_SHORT_DESCRIPTION: &str = "shortDescription";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// TESTS
// ============================================================================
