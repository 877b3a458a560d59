//! Invoice data.
//!
//! An [`InvoiceData`] is assembled through [`InvoiceDataBuilder`] and cannot be
//! changed afterwards. Its [`Totals`] are computed once, when it is built,
//! with checked arithmetic so an overflowing invoice is rejected up front.

use chrono::NaiveDate;
use derive_builder::Builder;
use rust_decimal::Decimal;
use thiserror::Error;

mod format;
pub use format::{format_currency, format_date};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// The address as printed in the "BILL TO" block.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.street.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInfo {
    pub bank: String,
    pub account_holder: String,
    pub account_number: String,
}

impl PaymentInfo {
    /// The payment details as printed in the "PAYMENT INFORMATION" block.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Bank: {}", self.bank),
            format!("Name: {}", self.account_holder),
            format!("Account: {}", self.account_number),
        ]
    }
}

/// A single billable row.
///
/// Items carry no quantity, so the amount billed is always the rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    description: String,
    rate: Decimal,
    amount: Decimal,
}

impl LineItem {
    pub fn new<S: Into<String>>(description: S, rate: Decimal) -> LineItem {
        LineItem {
            description: description.into(),
            rate,
            amount: rate,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    #[error("an invoice needs at least one line item")]
    NoItems,
    #[error("invoice totals are too large to compute")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
}

impl Totals {
    /// Sum the items and apply `tax_rate` (a percentage).
    ///
    /// Tax is rounded half-to-even to whole cents so that the printed total is
    /// always the sum of the printed subtotal and tax.
    pub fn compute(items: &[LineItem], tax_rate: Decimal) -> Result<Totals, TotalsError> {
        if items.is_empty() {
            return Err(TotalsError::NoItems);
        }
        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount()))
            .ok_or(TotalsError::Overflow)?;
        let tax = subtotal
            .checked_mul(tax_rate)
            .and_then(|tax| tax.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(TotalsError::Overflow)?
            .round_dp(2);
        let total = subtotal.checked_add(tax).ok_or(TotalsError::Overflow)?;
        Ok(Totals {
            subtotal,
            tax,
            total,
        })
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(
    setter(into),
    build_fn(private, name = "build_fields", validate = "Self::validate")
)]
pub struct InvoiceData {
    company_name: String,
    invoice_number: String,
    issue_date: NaiveDate,
    bill_to: Address,
    payment: PaymentInfo,
    #[builder(setter(each(name = "item")), default)]
    items: Vec<LineItem>,
    tax_rate: Decimal,
    terms: String,
    #[builder(setter(skip))]
    totals: Totals,
}

impl InvoiceDataBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.items.as_ref().map_or(true, Vec::is_empty) {
            return Err("an invoice needs at least one line item".to_string());
        }
        if let Some(rate) = self.tax_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(format!("tax rate {rate} is not between 0 and 100"));
            }
        }
        Ok(())
    }

    /// Build the invoice, computing its totals.
    pub fn build(&self) -> Result<InvoiceData, InvoiceDataBuilderError> {
        let mut invoice = self.build_fields()?;
        invoice.totals = Totals::compute(&invoice.items, invoice.tax_rate)
            .map_err(|e| InvoiceDataBuilderError::ValidationError(e.to_string()))?;
        Ok(invoice)
    }
}

impl InvoiceData {
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn bill_to(&self) -> &Address {
        &self.bill_to
    }

    pub fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn terms(&self) -> &str {
        &self.terms
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}
