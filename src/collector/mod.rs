//! Interactive collection of invoice details.
//!
//! [`collect_invoice`] walks through every field of an invoice in order,
//! asking again whenever an answer does not validate.

use crate::invoice::{Address, InvoiceData, InvoiceDataBuilder, LineItem, PaymentInfo};
use crate::validation::{
    parse_amount, parse_date, parse_percentage, parse_text, FieldKind, ValidationError,
};
use anyhow::{Context, Result};

mod prompter;
pub use prompter::{LinePrompter, Prompter, TerminalPrompter};

/// Typed in place of an item description to stop adding items.
const DONE: &str = "done";

/// Ask until `parse` accepts the answer.
fn ask_until_valid<P, T>(
    prompter: &mut P,
    prompt: &str,
    kind: FieldKind,
    parse: fn(&str) -> Result<T, ValidationError>,
) -> Result<T>
where
    P: Prompter + ?Sized,
{
    loop {
        let answer = prompter.ask(prompt, kind)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => {
                log::debug!("rejected answer to {prompt:?}: {e:?}");
                prompter.warn(&e.to_string())?;
            }
        }
    }
}

fn ask_text<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<String> {
    ask_until_valid(prompter, prompt, FieldKind::Text, parse_text)
}

fn collect_items<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Vec<LineItem>> {
    let mut items: Vec<LineItem> = Vec::default();
    loop {
        prompter.message(&format!("\nItem #{}", items.len() + 1))?;
        let description = ask_text(
            prompter,
            &format!("Enter service description (or '{DONE}' to finish)"),
        )?;

        if description.eq_ignore_ascii_case(DONE) {
            if items.is_empty() {
                prompter.warn(&ValidationError::NoItems.to_string())?;
                continue;
            }
            break;
        }

        let rate = ask_until_valid(prompter, "Enter rate ($)", FieldKind::Amount, parse_amount)?;
        items.push(LineItem::new(description, rate));
    }
    Ok(items)
}

/// Run through every prompt and assemble the invoice.
pub fn collect_invoice<P: Prompter + ?Sized>(prompter: &mut P) -> Result<InvoiceData> {
    prompter.section("COMPANY INFORMATION")?;
    prompter.message("Let's start with your company details!\n")?;
    let company_name = ask_text(prompter, "Enter your company name")?;
    let invoice_number = ask_text(prompter, "Enter invoice number (e.g., INV-01234)")?;
    let issue_date = ask_until_valid(
        prompter,
        "Enter invoice date (YYYY-MM-DD)",
        FieldKind::Date,
        parse_date,
    )?;

    prompter.section("BILLING INFORMATION")?;
    prompter.message("Now, let's get the billing details!\n")?;
    let bill_to = Address {
        name: ask_text(prompter, "Enter client company name")?,
        street: ask_text(prompter, "Enter street address")?,
        city: ask_text(prompter, "Enter city")?,
        state: ask_text(prompter, "Enter state")?,
        zip: ask_text(prompter, "Enter ZIP code")?,
    };

    prompter.message("\nPayment Information\n")?;
    let payment = PaymentInfo {
        bank: ask_text(prompter, "Enter bank name")?,
        account_holder: ask_text(prompter, "Enter account holder name")?,
        account_number: ask_text(prompter, "Enter account number")?,
    };

    prompter.section("SERVICE ITEMS")?;
    prompter.message(&format!(
        "Let's add your service items! (Enter '{DONE}' for description when finished)"
    ))?;
    let items = collect_items(prompter)?;

    let tax_rate = ask_until_valid(
        prompter,
        "Enter sales tax rate (%)",
        FieldKind::Percentage,
        parse_percentage,
    )?;

    prompter.section("TERMS AND CONDITIONS")?;
    let terms = ask_text(prompter, "Enter payment terms")?;

    log::debug!(
        "collected invoice {invoice_number} with {} item(s)",
        items.len()
    );
    InvoiceDataBuilder::default()
        .company_name(company_name)
        .invoice_number(invoice_number)
        .issue_date(issue_date)
        .bill_to(bill_to)
        .payment(payment)
        .items(items)
        .tax_rate(tax_rate)
        .terms(terms)
        .build()
        .with_context(|| "Failed to assemble invoice")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::tests::acme_invoice;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    const ACME_SCRIPT: &str = "Acme Co\nINV-01234\n2024-03-05\n\
        Globex\n1 Main St\nSpringfield\nIL\n62701\n\
        First Bank\nAcme Co\n000123\n\
        Consulting\n100.00\ndone\n\
        10\nNet 30\n";

    fn run(script: &str) -> (Result<InvoiceData>, String) {
        let mut prompter = LinePrompter::new(Cursor::new(script.as_bytes()), Vec::new());
        let result = collect_invoice(&mut prompter);
        let output = String::from_utf8(prompter.into_writer()).expect("output is utf-8");
        (result, output)
    }

    #[test]
    fn can_collect_acme_invoice() {
        let (invoice, output) = run(ACME_SCRIPT);
        assert_eq!(invoice.expect("can collect invoice"), acme_invoice());
        assert!(output.contains("COMPANY INFORMATION"));
        assert!(output.contains("Item #2"));
        assert!(!output.contains("Please"));
    }

    #[test]
    fn reprompts_on_invalid_answers() {
        let script = "\n   \nAcme Co\nINV-01234\n2024-13-01\n2024-03-05\n\
            Globex\n1 Main St\nSpringfield\nIL\n62701\n\
            First Bank\nAcme Co\n000123\n\
            Consulting\nabc\n-5\n79228162514264337593543950335\n$1,250.50\nDONE\n\
            150\n-1\n7.5%\nNet 30\n";
        let (invoice, output) = run(script);
        let invoice = invoice.expect("can collect invoice");

        assert_eq!(invoice.company_name(), "Acme Co");
        assert_eq!(invoice.items(), &[LineItem::new("Consulting", dec!(1250.50))]);
        assert_eq!(invoice.tax_rate(), dec!(7.5));
        assert_eq!(
            output
                .matches("This field cannot be empty. Please try again.")
                .count(),
            2
        );
        assert!(output.contains("Please enter a valid date in YYYY-MM-DD format."));
        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Please enter an amount of zero or more."));
        assert!(output.contains("Please enter an amount no larger than $1,000,000,000,000.00."));
        assert_eq!(
            output
                .matches("Please enter a percentage between 0 and 100.")
                .count(),
            2
        );
    }

    #[test]
    fn done_needs_at_least_one_item() {
        let script = "Acme Co\nINV-01234\n2024-03-05\n\
            Globex\n1 Main St\nSpringfield\nIL\n62701\n\
            First Bank\nAcme Co\n000123\n\
            Done\nConsulting\n100.00\ndone\n\
            10\nNet 30\n";
        let (invoice, output) = run(script);
        assert_eq!(invoice.expect("can collect invoice"), acme_invoice());
        assert_eq!(output.matches("Please add at least one item!").count(), 1);
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let (invoice, _) = run("Acme Co\nINV-01234\n");
        let err = invoice.expect_err("input ends early");
        assert!(err.to_string().contains("input closed"));
    }
}
