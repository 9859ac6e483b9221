//! Async resource operations.
//!
//! Each operation performs exactly one call through the [`ApiClient`] and
//! resolves to a payload or an [`OperationError`]. Nothing here touches slice
//! state; the reducer turns the result into a settlement action.

use crate::client::{ApiClient, ApiRequest, ApiResponse, Method};
use crate::envelope::Envelope;
use crate::error::OperationError;
use crate::filters::{list_query, Filters};
use crate::pagination::{Page, PageRequest};
use crate::resource::{Resource, ResourceId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A resource-specific operation addressed at one entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomOperation {
    /// Name used in actions and messages, e.g. `approve`
    pub name: String,
    /// HTTP method
    pub method: Method,
    /// Path segment appended after the id
    pub suffix: String,
}

impl CustomOperation {
    /// Operation whose path suffix equals its name
    #[must_use]
    pub fn new(name: impl Into<String>, method: Method) -> Self {
        let name = name.into();
        Self {
            suffix: name.clone(),
            name,
            method,
        }
    }

    /// Use a different path suffix
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Where a resource lives on the backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Collection path, e.g. `/customers`
    pub base_path: String,
    /// Registered custom operations
    pub custom: Vec<CustomOperation>,
}

impl Endpoint {
    /// Endpoint without custom operations
    ///
    /// A trailing `/` on `base_path` is dropped.
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path: String = base_path.into();
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            custom: Vec::new(),
        }
    }

    /// Register a custom operation
    #[must_use]
    pub fn with_custom(mut self, operation: CustomOperation) -> Self {
        self.custom.push(operation);
        self
    }

    /// `{base}`
    #[must_use]
    pub fn collection_path(&self) -> &str {
        &self.base_path
    }

    /// `{base}/{id}`
    #[must_use]
    pub fn item_path(&self, id: ResourceId) -> String {
        format!("{}/{id}", self.base_path)
    }

    /// `{base}/{id}/{suffix}`
    #[must_use]
    pub fn custom_path(&self, id: ResourceId, operation: &CustomOperation) -> String {
        format!("{}/{id}/{}", self.base_path, operation.suffix)
    }

    /// Look up a registered custom operation
    #[must_use]
    pub fn custom(&self, name: &str) -> Option<&CustomOperation> {
        self.custom.iter().find(|op| op.name == name)
    }
}

/// The operations of one resource against one backend
pub struct ResourceOperations<R> {
    client: Arc<dyn ApiClient>,
    endpoint: Arc<Endpoint>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceOperations<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            endpoint: Arc::clone(&self.endpoint),
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for ResourceOperations<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceOperations")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceOperations<R> {
    /// Operations for `endpoint` issued through `client`
    #[must_use]
    pub const fn new(client: Arc<dyn ApiClient>, endpoint: Arc<Endpoint>) -> Self {
        Self {
            client,
            endpoint,
            _resource: PhantomData,
        }
    }

    /// The endpoint these operations address
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch one page of the collection
    ///
    /// # Errors
    ///
    /// [`OperationError::Validation`] for a zero page number or size, without
    /// touching the network; transport and application failures otherwise.
    pub async fn fetch_list<F: Filters>(
        &self,
        page: PageRequest,
        filters: &F,
    ) -> Result<Page<R>, OperationError> {
        let action = format!("fetch {}", R::PLURAL);
        self.finish(&action, async {
            page.validate()?;

            let request = ApiRequest::new(Method::Get, self.endpoint.collection_path())
                .with_query(list_query(page, filters));
            let envelope = self.call(&action, request).await?;

            let items: Vec<R> = match envelope.data.clone() {
                None => Vec::new(),
                Some(data) => decode(data).ok_or_else(|| fallback(&action, None))?,
            };
            let pagination = envelope.pagination(page, items.len());
            Ok::<_, OperationError>(Page { items, pagination })
        })
        .await
    }

    /// Fetch one entity
    ///
    /// # Errors
    ///
    /// [`OperationError::NotFound`] when the server succeeds without data.
    pub async fn fetch_by_id(&self, id: ResourceId) -> Result<R, OperationError> {
        let action = format!("fetch {}", singular::<R>());
        self.finish(&action, async {
            let request = ApiRequest::new(Method::Get, self.endpoint.item_path(id));
            let envelope = self.call(&action, request).await?;

            let data = envelope
                .data
                .ok_or_else(|| OperationError::NotFound(format!("{} not found", R::NAME)))?;
            decode(data).ok_or_else(|| fallback(&action, None))
        })
        .await
    }

    /// Create an entity
    ///
    /// Resolves to the created entity when the server returns one.
    ///
    /// # Errors
    ///
    /// [`OperationError::Validation`] when [`Resource::validate`] rejects the
    /// input.
    pub async fn create(&self, input: &R::Input) -> Result<Option<R>, OperationError> {
        let action = format!("create {}", singular::<R>());
        self.finish(&action, async {
            R::validate(input).map_err(OperationError::Validation)?;
            let request = ApiRequest::new(Method::Post, self.endpoint.collection_path())
                .with_body(encode(&action, input)?);
            let envelope = self.call(&action, request).await?;
            Ok::<_, OperationError>(entity::<R>(&action, envelope))
        })
        .await
    }

    /// Replace an entity
    ///
    /// # Errors
    ///
    /// Same as [`ResourceOperations::create`].
    pub async fn update(
        &self,
        id: ResourceId,
        input: &R::Input,
    ) -> Result<Option<R>, OperationError> {
        let action = format!("update {}", singular::<R>());
        self.finish(&action, async {
            R::validate(input).map_err(OperationError::Validation)?;
            let request = ApiRequest::new(Method::Put, self.endpoint.item_path(id))
                .with_body(encode(&action, input)?);
            let envelope = self.call(&action, request).await?;
            Ok::<_, OperationError>(entity::<R>(&action, envelope))
        })
        .await
    }

    /// Delete an entity
    ///
    /// # Errors
    ///
    /// Transport and application failures.
    pub async fn delete(&self, id: ResourceId) -> Result<(), OperationError> {
        let action = format!("delete {}", singular::<R>());
        self.finish(&action, async {
            let request = ApiRequest::new(Method::Delete, self.endpoint.item_path(id));
            self.call(&action, request).await.map(|_| ())
        })
        .await
    }

    /// Run a registered custom operation
    ///
    /// # Errors
    ///
    /// [`OperationError::Validation`] when `name` is not registered on the
    /// endpoint.
    pub async fn custom(
        &self,
        name: &str,
        id: ResourceId,
        body: Option<Value>,
    ) -> Result<Option<R>, OperationError> {
        let action = format!("{name} {}", singular::<R>());
        self.finish(&action, async {
            let operation = self.endpoint.custom(name).ok_or_else(|| {
                OperationError::Validation(format!("Unknown operation '{name}' for {}", R::PLURAL))
            })?;

            let mut request = ApiRequest::new(operation.method, self.endpoint.custom_path(id, operation));
            if let Some(body) = body {
                request = request.with_body(body);
            }
            let envelope = self.call(&action, request).await?;
            Ok::<_, OperationError>(entity::<R>(&action, envelope))
        })
        .await
    }

    async fn finish<T>(
        &self,
        action: &str,
        operation: impl std::future::Future<Output = Result<T, OperationError>>,
    ) -> Result<T, OperationError> {
        let result = operation.await;
        let outcome = match &result {
            Ok(_) => {
                tracing::debug!(resource = R::PLURAL, action, "Operation succeeded");
                "success"
            },
            Err(error) => {
                tracing::warn!(
                    resource = R::PLURAL,
                    action,
                    kind = error.kind(),
                    status = error.status(),
                    %error,
                    "Operation failed"
                );
                error.kind()
            },
        };
        metrics::counter!(
            "resource.operation.total",
            "resource" => R::PLURAL,
            "operation" => action.to_string(),
            "outcome" => outcome,
        )
        .increment(1);
        result
    }

    /// Execute and normalize into a successful envelope
    async fn call(&self, action: &str, request: ApiRequest) -> Result<Envelope<Value>, OperationError> {
        tracing::debug!(method = %request.method, path = %request.path, "Dispatching request");

        let response = self.client.execute(request).await.map_err(|error| {
            let message = error.message.trim();
            if message.is_empty() {
                OperationError::Transport(format!("Network error during {action}"))
            } else {
                OperationError::Transport(message.to_string())
            }
        })?;

        normalize(action, response)
    }
}

fn normalize(action: &str, response: ApiResponse) -> Result<Envelope<Value>, OperationError> {
    let status = response.status;
    let success = response.is_success();

    let Some(body) = response.body else {
        if success {
            // 204 and other empty bodies
            return Ok(Envelope::empty_success());
        }
        return Err(fallback(action, Some(status)));
    };

    let envelope = serde_json::from_value::<Envelope<Value>>(body).ok();
    let message = envelope
        .as_ref()
        .and_then(Envelope::message)
        .map_or_else(|| format!("Failed to {action}"), str::to_string);

    match envelope {
        Some(envelope) if success && envelope.is_success => Ok(envelope),
        Some(_) => Err(OperationError::Application {
            status: Some(status),
            message,
        }),
        None if success => Err(fallback(action, Some(status))),
        None => Err(OperationError::Application {
            status: Some(status),
            message,
        }),
    }
}

fn fallback(action: &str, status: Option<u16>) -> OperationError {
    OperationError::Application {
        status,
        message: format!("Failed to {action}"),
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Option<T> {
    match serde_json::from_value(data) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, "Response data did not match the expected shape");
            None
        },
    }
}

fn encode<T: serde::Serialize>(action: &str, input: &T) -> Result<Value, OperationError> {
    serde_json::to_value(input)
        .map_err(|e| OperationError::Validation(format!("Failed to {action}: {e}")))
}

/// The entity a mutation returned, if any
fn entity<R: Resource>(action: &str, envelope: Envelope<Value>) -> Option<R> {
    let data = envelope.data?;
    let decoded = decode(data);
    if decoded.is_none() {
        tracing::debug!(action, "Mutation succeeded without a usable entity");
    }
    decoded
}

fn singular<R: Resource>() -> String {
    R::NAME.to_lowercase()
}
