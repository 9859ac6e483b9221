//! The entity side of a slice: what a resource is and how it is identified.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Numeric identifier of a remote entity
///
/// Every mutating operation except create addresses its target by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Creates a `ResourceId` from a raw number
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote entity type managed by a slice
///
/// Implementors describe the wire shape (via serde), the body sent on
/// create/update, and the names used in user-facing messages.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use slicekit_resource::{Resource, ResourceId};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// struct Meter {
///     id: u64,
///     serial: String,
/// }
///
/// #[derive(Clone, Debug, Serialize)]
/// struct MeterInput {
///     serial: String,
/// }
///
/// impl Resource for Meter {
///     type Input = MeterInput;
///     const NAME: &'static str = "Meter";
///     const PLURAL: &'static str = "meters";
///
///     fn id(&self) -> ResourceId {
///         ResourceId::new(self.id)
///     }
/// }
/// ```
pub trait Resource:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Body sent to create or update an entity
    type Input: Clone + Debug + Serialize + Send + Sync + 'static;

    /// Singular display name, capitalized ("Customer")
    const NAME: &'static str;

    /// Plural name used in list messages and metrics ("customers")
    const PLURAL: &'static str;

    /// The entity's identifier
    fn id(&self) -> ResourceId;

    /// Client-side validation run before create/update reaches the network
    ///
    /// # Errors
    ///
    /// Returns a field-level message describing the first invalid field.
    fn validate(_input: &Self::Input) -> Result<(), String> {
        Ok(())
    }
}
