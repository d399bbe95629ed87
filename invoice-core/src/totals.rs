use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::invoice::Invoice;
use crate::line_item::{net_amount, tax_amount, LineItem, TaxType};
use crate::words::{to_words, AmountInWords};

/// Aggregates over all line items of an invoice.
///
/// Always recomputed from the items; nothing here is cached or stored.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub tax_type: TaxType,
    pub total_net_amount: Decimal,
    /// Sum of per-line taxes, each at its own rate.
    pub total_tax_amount: Decimal,
    pub grand_total: Decimal,
    /// Words for the floor of `grand_total`.
    pub grand_total_in_words: AmountInWords,
}

impl InvoiceTotals {
    /// Fails with [`Error::AmountOverflow`] if any line or running sum
    /// leaves the `Decimal` range.
    pub fn compute(items: &[LineItem], tax_type: TaxType) -> Result<Self> {
        let (total_net_amount, total_tax_amount) = items.iter().try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(net_sum, tax_sum), item| -> Result<(Decimal, Decimal)> {
                let net = net_amount(item)?;
                let tax = tax_amount(net, item.tax_rate)?;
                Ok((
                    net_sum
                        .checked_add(net)
                        .ok_or(Error::AmountOverflow("total net amount"))?,
                    tax_sum
                        .checked_add(tax)
                        .ok_or(Error::AmountOverflow("total tax amount"))?,
                ))
            },
        )?;
        let grand_total = total_net_amount
            .checked_add(total_tax_amount)
            .ok_or(Error::AmountOverflow("grand total"))?;

        Ok(InvoiceTotals {
            tax_type,
            total_net_amount,
            total_tax_amount,
            grand_total,
            grand_total_in_words: to_words(grand_total),
        })
    }

    pub fn for_invoice(invoice: &Invoice) -> Result<Self> {
        Self::compute(&invoice.items, invoice.tax_type())
    }
}
