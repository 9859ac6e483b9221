//! Installed meters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slicekit_resource::{BasicFilterField, BasicFilters, Endpoint, Filters, QueryParams, Resource, ResourceId};

/// A meter installed at a customer's premises
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meter {
    /// Backend id
    pub id: u64,
    /// Manufacturer serial number
    pub serial_number: String,
    /// `Electricity`, `Water`, ...
    pub meter_type: String,
    /// Owning customer
    pub customer_id: u64,
    /// Meter status as the backend spells it
    pub status: String,
    /// Installation date, if installed
    pub installed_on: Option<NaiveDate>,
    /// Most recent reading in the meter's unit
    pub last_reading: Option<f64>,
}

/// Body for registering or updating a meter
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterInput {
    /// Manufacturer serial number
    pub serial_number: String,
    /// `Electricity`, `Water`, ...
    pub meter_type: String,
    /// Owning customer
    pub customer_id: u64,
}

impl Resource for Meter {
    type Input = MeterInput;
    const NAME: &'static str = "Meter";
    const PLURAL: &'static str = "meters";

    fn id(&self) -> ResourceId {
        ResourceId::new(self.id)
    }

    fn validate(input: &MeterInput) -> Result<(), String> {
        if input.serial_number.trim().is_empty() {
            Err("Serial number is required".to_string())
        } else {
            Ok(())
        }
    }
}

/// Meter list predicates
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterFilters {
    /// Search, status and sorting
    pub basic: BasicFilters,
    /// Only this customer's meters
    pub customer_id: Option<u64>,
    /// Only meters of this type
    pub meter_type: Option<String>,
}

/// Single-field edit of [`MeterFilters`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeterFilterField {
    /// Search, status or sorting
    Basic(BasicFilterField),
    /// Set or clear the customer
    CustomerId(Option<u64>),
    /// Set or clear the meter type
    MeterType(Option<String>),
}

impl Filters for MeterFilters {
    type Field = MeterFilterField;

    fn set(&mut self, field: MeterFilterField) {
        match field {
            MeterFilterField::Basic(f) => self.basic.set(f),
            MeterFilterField::CustomerId(v) => self.customer_id = v,
            MeterFilterField::MeterType(v) => self.meter_type = v,
        }
    }

    fn append_to(&self, query: &mut QueryParams) {
        self.basic.append_to(query);
        query.insert_opt("CustomerId", self.customer_id);
        query.insert_opt("MeterType", self.meter_type.as_deref());
    }
}

/// `/meters`
#[must_use]
pub fn endpoint() -> Endpoint {
    Endpoint::new("/meters")
}
