//! Customer payments and their approval workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use slicekit_resource::{
    BasicFilterField, BasicFilters, CustomOperation, Endpoint, Filters, Method, QueryParams, Resource,
    ResourceId,
};

/// Approve a pending payment
pub const APPROVE: &str = "approve";
/// Decline a pending payment
pub const DECLINE: &str = "decline";

/// A payment received from a customer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend id
    pub id: u64,
    /// Paying customer
    pub customer_id: u64,
    /// Amount in the account currency
    pub amount: f64,
    /// Bank or gateway reference
    pub reference: String,
    /// `Pending`, `Approved` or `Declined`
    pub status: String,
    /// When the payment was received
    pub paid_at: DateTime<Utc>,
}

/// Body for recording a payment
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Paying customer
    pub customer_id: u64,
    /// Amount in the account currency
    pub amount: f64,
    /// Bank or gateway reference
    pub reference: String,
}

impl Resource for Payment {
    type Input = PaymentInput;
    const NAME: &'static str = "Payment";
    const PLURAL: &'static str = "payments";

    fn id(&self) -> ResourceId {
        ResourceId::new(self.id)
    }

    fn validate(input: &PaymentInput) -> Result<(), String> {
        if input.amount.is_nan() || input.amount <= 0.0 {
            return Err("Amount must be greater than zero".to_string());
        }
        if input.reference.trim().is_empty() {
            return Err("Reference is required".to_string());
        }
        Ok(())
    }
}

/// Payment list predicates
///
/// Amount bounds of zero are real bounds and are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFilters {
    /// Search, status and sorting
    pub basic: BasicFilters,
    /// Smallest amount, inclusive
    pub min_amount: Option<f64>,
    /// Largest amount, inclusive
    pub max_amount: Option<f64>,
    /// Only this customer's payments
    pub customer_id: Option<u64>,
    /// Paid on or after
    pub from_date: Option<NaiveDate>,
    /// Paid on or before
    pub to_date: Option<NaiveDate>,
}

/// Single-field edit of [`PaymentFilters`]
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentFilterField {
    /// Search, status or sorting
    Basic(BasicFilterField),
    /// Set or clear the lower amount bound
    MinAmount(Option<f64>),
    /// Set or clear the upper amount bound
    MaxAmount(Option<f64>),
    /// Set or clear the customer
    CustomerId(Option<u64>),
    /// Set or clear the start date
    FromDate(Option<NaiveDate>),
    /// Set or clear the end date
    ToDate(Option<NaiveDate>),
}

impl Filters for PaymentFilters {
    type Field = PaymentFilterField;

    fn set(&mut self, field: PaymentFilterField) {
        match field {
            PaymentFilterField::Basic(f) => self.basic.set(f),
            PaymentFilterField::MinAmount(v) => self.min_amount = v,
            PaymentFilterField::MaxAmount(v) => self.max_amount = v,
            PaymentFilterField::CustomerId(v) => self.customer_id = v,
            PaymentFilterField::FromDate(v) => self.from_date = v,
            PaymentFilterField::ToDate(v) => self.to_date = v,
        }
    }

    fn append_to(&self, query: &mut QueryParams) {
        self.basic.append_to(query);
        query.insert_opt("MinAmount", self.min_amount);
        query.insert_opt("MaxAmount", self.max_amount);
        query.insert_opt("CustomerId", self.customer_id);
        query.insert_opt("FromDate", self.from_date);
        query.insert_opt("ToDate", self.to_date);
    }
}

/// `/payments`, with approve and decline
#[must_use]
pub fn endpoint() -> Endpoint {
    Endpoint::new("/payments")
        .with_custom(CustomOperation::new(APPROVE, Method::Put))
        .with_custom(CustomOperation::new(DECLINE, Method::Put))
}
