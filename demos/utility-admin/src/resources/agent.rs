//! Field agents.

use serde::{Deserialize, Serialize};
use slicekit_resource::{
    BasicFilterField, BasicFilters, CustomOperation, Endpoint, Filters, Method, QueryParams, Resource,
    ResourceId,
};

/// Stop assigning work to an agent
pub const PAUSE: &str = "pause";
/// Resume assigning work to an agent
pub const RESUME: &str = "resume";

/// A field agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Backend id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Service region
    pub region: String,
    /// `Active` or `Paused`
    pub status: String,
}

/// Body for creating or updating an agent
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInput {
    /// Display name
    pub name: String,
    /// Service region
    pub region: String,
}

impl Resource for Agent {
    type Input = AgentInput;
    const NAME: &'static str = "Agent";
    const PLURAL: &'static str = "agents";

    fn id(&self) -> ResourceId {
        ResourceId::new(self.id)
    }
}

/// Agent list predicates
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFilters {
    /// Search, status and sorting
    pub basic: BasicFilters,
    /// Only agents in this region
    pub region: Option<String>,
}

/// Single-field edit of [`AgentFilters`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentFilterField {
    /// Search, status or sorting
    Basic(BasicFilterField),
    /// Set or clear the region
    Region(Option<String>),
}

impl Filters for AgentFilters {
    type Field = AgentFilterField;

    fn set(&mut self, field: AgentFilterField) {
        match field {
            AgentFilterField::Basic(f) => self.basic.set(f),
            AgentFilterField::Region(v) => self.region = v,
        }
    }

    fn append_to(&self, query: &mut QueryParams) {
        self.basic.append_to(query);
        query.insert_opt("Region", self.region.as_deref());
    }
}

/// `/agents`, with pause and resume
#[must_use]
pub fn endpoint() -> Endpoint {
    Endpoint::new("/agents")
        .with_custom(CustomOperation::new(PAUSE, Method::Put))
        .with_custom(CustomOperation::new(RESUME, Method::Put))
}
