// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::pricing;
use crate::utils::{lenient_date, lenient_decimal};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "Nos")]
    Nos,
    #[serde(rename = "Sq.Ft")]
    SqFt,
    #[serde(rename = "R.Ft")]
    RFt,
    #[serde(rename = "Mtr")]
    Mtr,
    #[serde(rename = "Set")]
    Set,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Nos, Unit::SqFt, Unit::RFt, Unit::Mtr, Unit::Set];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Nos => "Nos",
            Unit::SqFt => "Sq.Ft",
            Unit::RFt => "R.Ft",
            Unit::Mtr => "Mtr",
            Unit::Set => "Set",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "nos" | "no" | "count" => Ok(Unit::Nos),
            "sqft" | "area" => Ok(Unit::SqFt),
            "rft" | "linear" => Ok(Unit::RFt),
            "mtr" | "m" | "metre" | "meter" => Ok(Unit::Mtr),
            "set" => Ok(Unit::Set),
            _ => Err(anyhow!(
                "Unknown unit '{}' (use Nos|Sq.Ft|R.Ft|Mtr|Set)",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Draft,
    Sent,
    Approved,
    Paid,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Draft, Status::Sent, Status::Approved, Status::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Sent => "Sent",
            Status::Approved => "Approved",
            Status::Paid => "Paid",
        }
    }

    /// Approved and paid quotations are presented as invoices.
    pub fn is_invoice(&self) -> bool {
        matches!(self, Status::Approved | Status::Paid)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Status::Draft),
            "sent" => Ok(Status::Sent),
            "approved" => Ok(Status::Approved),
            "paid" => Ok(Status::Paid),
            _ => Err(anyhow!(
                "Unknown status '{}' (use draft|sent|approved|paid)",
                s.trim()
            )),
        }
    }
}

/// Physical size of a unit, informational only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, with = "lenient_decimal")]
    pub length: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub height: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub depth: Decimal,
}

impl Dimensions {
    pub fn new(length: Decimal, height: Decimal, depth: Decimal) -> Self {
        Self {
            length,
            height,
            depth,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.length > Decimal::ZERO || self.height > Decimal::ZERO
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, with = "lenient_decimal")]
    quantity: Decimal,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, with = "lenient_decimal")]
    rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    amount: Decimal,
}

impl LineItem {
    /// A blank item with a fresh identifier: one `Nos` in `General` at zero rate.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: default_category(),
            name: String::new(),
            description: String::new(),
            dimensions: None,
            quantity: Decimal::ONE,
            unit: Unit::Nos,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
        self.amount = pricing::line_amount(self.quantity, self.rate);
    }

    pub(crate) fn set_rate(&mut self, rate: Decimal) {
        self.rate = rate;
        self.amount = pricing::line_amount(self.quantity, self.rate);
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Derived money fields. Only `pricing` writes these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(default, with = "lenient_decimal")]
    pub(crate) subtotal: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub(crate) tax_amount: Decimal,
    #[serde(default, with = "lenient_decimal")]
    pub(crate) total: Decimal,
}

impl Totals {
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub number: String,
    #[serde(default, with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(default, with = "lenient_date")]
    pub valid_until: NaiveDate,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default, with = "lenient_decimal")]
    tax_rate: Decimal,
    #[serde(default, with = "lenient_decimal")]
    discount: Decimal,
    #[serde(flatten)]
    totals: Totals,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: Status,
}

impl Quotation {
    /// An empty draft. The returned value has already been through the engine.
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        date: NaiveDate,
        valid_until: NaiveDate,
        tax_rate: Decimal,
        notes: impl Into<String>,
    ) -> Self {
        pricing::recalculate(Self {
            id: id.into(),
            number: number.into(),
            date,
            valid_until,
            customer: Customer::default(),
            items: Vec::new(),
            tax_rate,
            discount: Decimal::ZERO,
            totals: Totals::default(),
            notes: notes.into(),
            status: Status::Draft,
        })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    pub fn tax_amount(&self) -> Decimal {
        self.totals.tax_amount
    }

    pub fn total(&self) -> Decimal {
        self.totals.total
    }

    pub fn is_invoice(&self) -> bool {
        self.status.is_invoice()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }

    pub(crate) fn set_tax_rate(&mut self, tax_rate: Decimal) {
        self.tax_rate = tax_rate;
    }

    pub(crate) fn set_discount(&mut self, discount: Decimal) {
        self.discount = discount;
    }

    pub(crate) fn set_totals(&mut self, totals: Totals) {
        self.totals = totals;
    }
}
