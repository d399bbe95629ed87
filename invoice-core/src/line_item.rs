use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the invoice table.
///
/// Amounts are not range-checked here. A discount larger than the gross
/// amount gives a negative net amount, and that value flows into tax and
/// totals unchanged. Use [`validate_items`] at the input boundary when
/// rejection is wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    /// Percentage, e.g. `18` for 18%.
    pub tax_rate: Decimal,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        discount: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        LineItem {
            description: description.into(),
            unit_price,
            quantity,
            discount,
            tax_rate,
        }
    }
}

/// Invoice-wide tax classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// Supply and delivery in the same state: split central + state tax.
    CgstSgst,
    /// Cross-state supply: single integrated tax.
    Igst,
}

impl TaxType {
    pub fn label(&self) -> &'static str {
        match self {
            TaxType::CgstSgst => "CGST/SGST",
            TaxType::Igst => "IGST",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `unit_price * quantity - discount`, not floored at zero.
///
/// Fails with [`Error::AmountOverflow`] when the result does not fit a
/// `Decimal` (magnitude above roughly 7.9e28).
pub fn net_amount(item: &LineItem) -> Result<Decimal> {
    item.unit_price
        .checked_mul(Decimal::from(item.quantity))
        .and_then(|gross| gross.checked_sub(item.discount))
        .ok_or(Error::AmountOverflow("net amount"))
}

/// Exact, case-sensitive comparison of the two places.
pub fn tax_type(place_of_supply: &str, place_of_delivery: &str) -> TaxType {
    if place_of_supply == place_of_delivery {
        TaxType::CgstSgst
    } else {
        TaxType::Igst
    }
}

pub fn tax_amount(net_amount: Decimal, tax_rate: Decimal) -> Result<Decimal> {
    tax_rate
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| net_amount.checked_mul(fraction))
        .ok_or(Error::AmountOverflow("tax amount"))
}

/// How a line's tax is shown on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxSplit {
    /// Half central, half state.
    CentralState { central: Decimal, state: Decimal },
    Integrated(Decimal),
}

/// Read-only projection of a line item with its derived amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLineItem<'a> {
    pub item: &'a LineItem,
    pub net_amount: Decimal,
    pub tax_type: TaxType,
    pub tax_amount: Decimal,
}

impl<'a> ComputedLineItem<'a> {
    pub fn compute(item: &'a LineItem, tax_type: TaxType) -> Result<Self> {
        let net = net_amount(item)?;
        Ok(ComputedLineItem {
            item,
            net_amount: net,
            tax_type,
            tax_amount: tax_amount(net, item.tax_rate)?,
        })
    }

    pub fn split(&self) -> TaxSplit {
        match self.tax_type {
            TaxType::CgstSgst => {
                let half = self.tax_amount / Decimal::TWO;
                TaxSplit::CentralState {
                    central: half,
                    state: half,
                }
            }
            TaxType::Igst => TaxSplit::Integrated(self.tax_amount),
        }
    }

    /// Net amount plus tax for this line.
    pub fn line_total(&self) -> Result<Decimal> {
        self.net_amount
            .checked_add(self.tax_amount)
            .ok_or(Error::AmountOverflow("line total"))
    }
}

/// Project every item under the invoice-wide tax type.
pub fn compute_items(items: &[LineItem], tax_type: TaxType) -> Result<Vec<ComputedLineItem<'_>>> {
    items
        .iter()
        .map(|item| ComputedLineItem::compute(item, tax_type))
        .collect()
}

/// Reject negative prices, negative discounts and tax rates outside
/// 0..=100. Reports the first offending item.
pub fn validate_items(items: &[LineItem]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        let reason = if item.unit_price < Decimal::ZERO {
            Some(format!("unit price {} is negative", item.unit_price))
        } else if item.discount < Decimal::ZERO {
            Some(format!("discount {} is negative", item.discount))
        } else if item.tax_rate < Decimal::ZERO || item.tax_rate > Decimal::ONE_HUNDRED {
            Some(format!("tax rate {} is outside 0..=100", item.tax_rate))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::InvalidLineItem { index, reason });
        }
    }
    Ok(())
}
