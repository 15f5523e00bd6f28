//! Financial and date consistency of invoice creation requests.
//!
//! Checks run in a fixed order and stop at the first failure:
//! item totals → subtotal → total → date order.

use invoicer_core::{DomainError, DomainResult};

use crate::invoice::{CreateInvoiceItemRequest, CreateInvoiceRequest};

/// Validate a creation request against the invoice invariants.
///
/// No side effects; the returned error names the violated rule.
pub fn validate(request: &CreateInvoiceRequest) -> DomainResult<()> {
    check_item_totals(&request.items)?;
    check_subtotal(request)?;
    check_total(request)?;
    check_date_order(request)?;
    Ok(())
}

/// Invariant: every item total equals `unit_price * quantity`.
fn check_item_totals(items: &[CreateInvoiceItemRequest]) -> DomainResult<()> {
    for (idx, item) in items.iter().enumerate() {
        let line_no = idx + 1;
        let expected = item.unit_price.checked_mul(item.quantity).ok_or_else(|| {
            DomainError::validation(format!(
                "item {line_no} total does not equal unit price x quantity (amount overflow)"
            ))
        })?;
        if item.total != expected {
            return Err(DomainError::validation(format!(
                "item {line_no} total {} does not equal unit price {} x quantity {}",
                item.total, item.unit_price, item.quantity
            )));
        }
    }
    Ok(())
}

/// Invariant: subtotal equals the sum of item totals.
fn check_subtotal(request: &CreateInvoiceRequest) -> DomainResult<()> {
    let sum = request
        .items
        .iter()
        .try_fold(0u64, |acc, item| acc.checked_add(item.total))
        .ok_or_else(|| {
            DomainError::validation(
                "subtotal does not equal the sum of item totals (amount overflow)",
            )
        })?;
    if request.subtotal != sum {
        return Err(DomainError::validation(format!(
            "subtotal {} does not equal the sum of item totals {sum}",
            request.subtotal
        )));
    }
    Ok(())
}

/// Invariant: total equals subtotal plus tax.
fn check_total(request: &CreateInvoiceRequest) -> DomainResult<()> {
    let expected = request.subtotal.checked_add(request.tax).ok_or_else(|| {
        DomainError::validation("total does not equal subtotal + tax (amount overflow)")
    })?;
    if request.total != expected {
        return Err(DomainError::validation(format!(
            "total {} does not equal subtotal {} + tax {}",
            request.total, request.subtotal, request.tax
        )));
    }
    Ok(())
}

/// Invariant: issue date strictly precedes due date.
fn check_date_order(request: &CreateInvoiceRequest) -> DomainResult<()> {
    if request.issue_date >= request.due_date {
        return Err(DomainError::validation(format!(
            "issue date {} must be before due date {}",
            request.issue_date, request.due_date
        )));
    }
    Ok(())
}
