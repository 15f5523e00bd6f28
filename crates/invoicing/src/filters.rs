//! Query filter contract for invoice listings.
//!
//! Raw optional parameters ([`InvoiceFilters`]) are validated once into
//! [`InvoiceCriteria`]; storage adapters only ever see the validated form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicer_core::{DomainError, DomainResult};

use crate::invoice::Invoice;

/// Optional date filters as received from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilters {
    pub issue_date: Option<NaiveDate>,
    pub issue_date_from: Option<NaiveDate>,
    pub issue_date_to: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
}

impl InvoiceFilters {
    /// Check the combination rules and produce typed criteria.
    ///
    /// The issue-date dimension is checked before the due-date one; within a
    /// dimension an exact date mixed with range bounds is reported before a
    /// half-open range.
    pub fn validate(&self) -> DomainResult<InvoiceCriteria> {
        Ok(InvoiceCriteria {
            issue_date: DateCriterion::from_parts(
                "invoiceDate",
                "invoice date",
                self.issue_date,
                self.issue_date_from,
                self.issue_date_to,
            )?,
            due_date: DateCriterion::from_parts(
                "dueDate",
                "due date",
                self.due_date,
                self.due_date_from,
                self.due_date_to,
            )?,
        })
    }
}

/// Constraint on one date dimension. Range bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateCriterion {
    #[default]
    Any,
    On(NaiveDate),
    Between { from: NaiveDate, to: NaiveDate },
}

impl DateCriterion {
    fn from_parts(
        param: &str,
        label: &str,
        exact: Option<NaiveDate>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        match (exact, from, to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(DomainError::validation(format!(
                "cannot use '{param}' along with {label} range parameters"
            ))),
            (Some(date), None, None) => Ok(DateCriterion::On(date)),
            (None, Some(from), Some(to)) => Ok(DateCriterion::Between { from, to }),
            (None, Some(_), None) | (None, None, Some(_)) => Err(DomainError::validation(
                format!("both range parameters must be present for '{param}'"),
            )),
            (None, None, None) => Ok(DateCriterion::Any),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateCriterion::Any => true,
            DateCriterion::On(exact) => date == exact,
            DateCriterion::Between { from, to } => from <= date && date <= to,
        }
    }

    /// `(exact, from, to)`, handy for binding as nullable SQL parameters.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>, Option<NaiveDate>) {
        match *self {
            DateCriterion::Any => (None, None, None),
            DateCriterion::On(date) => (Some(date), None, None),
            DateCriterion::Between { from, to } => (None, Some(from), Some(to)),
        }
    }
}

/// Validated filter set. Both dimensions must match (logical AND).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceCriteria {
    pub issue_date: DateCriterion,
    pub due_date: DateCriterion,
}

impl InvoiceCriteria {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.issue_date.matches(invoice.issue_date) && self.due_date.matches(invoice.due_date)
    }
}
