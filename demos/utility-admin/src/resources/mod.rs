//! The back-office resources and their filters.

pub mod agent;
pub mod customer;
pub mod meter;
pub mod payment;
pub mod role;

pub use agent::{Agent, AgentFilterField, AgentFilters, AgentInput};
pub use customer::{Customer, CustomerFilterField, CustomerFilters, CustomerInput};
pub use meter::{Meter, MeterFilterField, MeterFilters, MeterInput};
pub use payment::{Payment, PaymentFilterField, PaymentFilters, PaymentInput};
pub use role::{Role, RoleInput};
