//! Item collection client: view state plus the transitions that mutate it.
//!
//! # Design
//! Every network operation is a pair of transitions. `begin_*` checks the
//! single-operation guard, clears `last_error`, raises `pending` and hands
//! back the `HttpRequest` to execute. `finish_*` takes whatever the host got
//! back (a response or a transport error), releases `pending` before looking
//! at it, then applies success or failure to the view state.
//!
//! Hosts that can block on I/O use the convenience methods (`fetch_items`,
//! `create`, ...) which run begin, `Transport::execute` and finish in one
//! call. Hosts with their own event loop keep the request in flight between
//! the two halves; a second `begin_*` in that window is rejected with
//! `CollectionError::Busy`.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::ItemClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::state::{Health, ViewState};
use crate::types::{Item, ItemId, NewItem};

pub const VALIDATION_MESSAGE: &str = "Please fill in both title and description";
pub const CONNECT_MESSAGE: &str = "Failed to connect to backend";
pub const FETCH_MESSAGE: &str = "Failed to fetch items";
pub const CREATE_MESSAGE: &str = "Failed to create item";
pub const DELETE_MESSAGE: &str = "Failed to delete item";

/// A network operation that can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Health,
    Fetch,
    Create,
    Delete(ItemId),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Health => "health probe",
            Operation::Fetch => "list fetch",
            Operation::Create => "create",
            Operation::Delete(_) => "delete",
        }
    }

    /// User-visible message written to `last_error` when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Health => CONNECT_MESSAGE,
            Operation::Fetch => FETCH_MESSAGE,
            Operation::Create => CREATE_MESSAGE,
            Operation::Delete(_) => DELETE_MESSAGE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Delete(id) => write!(f, "delete of item {id}"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Another operation is still pending; nothing was changed.
    #[error("{0} is still pending")]
    Busy(Operation),

    /// A `finish_*` call did not match the operation in flight.
    #[error("no {0} is in flight")]
    NotInFlight(&'static str),

    /// The draft was rejected locally; no request was issued.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation(#[source] ApiError),

    /// The operation reached the network and failed.
    #[error("{operation} failed: {source}")]
    Failed {
        operation: Operation,
        #[source]
        source: ApiError,
    },
}

/// Owns the view state for one remote item collection.
#[derive(Debug, Clone)]
pub struct ItemCollection {
    client: ItemClient,
    state: ViewState,
    in_flight: Option<Operation>,
}

impl ItemCollection {
    pub fn new(client: ItemClient) -> Self {
        Self {
            client,
            state: ViewState::default(),
            in_flight: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ItemClient::new(&config.api_url))
    }

    pub fn client(&self) -> &ItemClient {
        &self.client
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.state.draft.description = description.into();
    }

    // -----------------------------------------------------------------------
    // Health probe
    // -----------------------------------------------------------------------

    pub fn begin_health(&mut self) -> Result<HttpRequest, CollectionError> {
        self.begin(Operation::Health)?;
        Ok(self.client.build_health())
    }

    /// Non-fatal: a failure only marks the backend unreachable.
    pub fn finish_health(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), CollectionError> {
        self.release(|op| matches!(op, Operation::Health), Operation::Health.name())?;
        let parsed = outcome.and_then(|response| self.client.parse_health(response));
        match parsed {
            Ok(report) => {
                info!(status = %report.status, "backend health reported");
                self.state.health = Health::Reported(report.status);
                Ok(())
            }
            Err(source) => {
                self.state.health = Health::Unreachable;
                Err(self.fail(Operation::Health, source))
            }
        }
    }

    // -----------------------------------------------------------------------
    // List fetch
    // -----------------------------------------------------------------------

    pub fn begin_fetch(&mut self) -> Result<HttpRequest, CollectionError> {
        self.begin(Operation::Fetch)?;
        Ok(self.client.build_list_items())
    }

    /// Replaces `items` wholesale on success; leaves it untouched otherwise.
    pub fn finish_fetch(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), CollectionError> {
        self.release(|op| matches!(op, Operation::Fetch), Operation::Fetch.name())?;
        let parsed = outcome
            .and_then(|response| self.client.parse_list_items(response))
            .and_then(reject_duplicate_ids);
        match parsed {
            Ok(items) => {
                info!(count = items.len(), "items fetched");
                self.state.items = items;
                Ok(())
            }
            Err(source) => Err(self.fail(Operation::Fetch, source)),
        }
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// Validate the draft and start a create.
    ///
    /// A blank title or description sets the validation message and returns
    /// without raising `pending`.
    pub fn begin_create(&mut self) -> Result<HttpRequest, CollectionError> {
        if let Some(current) = self.in_flight {
            return Err(self.reject(current, Operation::Create));
        }
        let input = match NewItem::from_draft(&self.state.draft.title, &self.state.draft.description) {
            Ok(input) => input,
            Err(source) => {
                debug!("create rejected by validation");
                self.state.last_error = Some(VALIDATION_MESSAGE.to_string());
                return Err(CollectionError::Validation(source));
            }
        };
        let request = match self.client.build_create_item(&input) {
            Ok(request) => request,
            Err(source) => return Err(self.fail(Operation::Create, source)),
        };
        self.begin(Operation::Create)?;
        Ok(request)
    }

    /// Appends the server-assigned item and clears the draft on success.
    pub fn finish_create(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), CollectionError> {
        self.release(|op| matches!(op, Operation::Create), Operation::Create.name())?;
        let parsed = outcome.and_then(|response| self.client.parse_create_item(response));
        match parsed {
            Ok(item) if self.state.contains(item.id) => {
                let source = ApiError::Deserialization(format!("server returned existing id {}", item.id));
                Err(self.fail(Operation::Create, source))
            }
            Ok(item) => {
                info!(id = %item.id, "item created");
                self.state.items.push(item);
                self.state.draft.clear();
                Ok(())
            }
            Err(source) => Err(self.fail(Operation::Create, source)),
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    pub fn begin_delete(&mut self, id: ItemId) -> Result<HttpRequest, CollectionError> {
        self.begin(Operation::Delete(id))?;
        Ok(self.client.build_delete_item(id))
    }

    /// Removes the entry with the in-flight id, if it is still listed.
    pub fn finish_delete(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), CollectionError> {
        let operation = self.release(|op| matches!(op, Operation::Delete(_)), "delete")?;
        let Operation::Delete(id) = operation else {
            return Err(CollectionError::NotInFlight(operation.name()));
        };
        let parsed = outcome.and_then(|response| self.client.parse_delete_item(response));
        match parsed {
            Ok(()) => {
                let removed = self.state.remove(id);
                info!(%id, removed, "item deleted");
                Ok(())
            }
            Err(source) => Err(self.fail(operation, source)),
        }
    }

    // -----------------------------------------------------------------------
    // Blocking convenience wrappers
    // -----------------------------------------------------------------------

    pub fn probe_health<T: Transport>(&mut self, transport: &T) -> Result<(), CollectionError> {
        let request = self.begin_health()?;
        let outcome = transport.execute(request);
        self.finish_health(outcome)
    }

    pub fn fetch_items<T: Transport>(&mut self, transport: &T) -> Result<(), CollectionError> {
        let request = self.begin_fetch()?;
        let outcome = transport.execute(request);
        self.finish_fetch(outcome)
    }

    /// Submit the current draft.
    pub fn create<T: Transport>(&mut self, transport: &T) -> Result<(), CollectionError> {
        let request = self.begin_create()?;
        let outcome = transport.execute(request);
        self.finish_create(outcome)
    }

    /// Fill the draft and submit it.
    pub fn create_from<T: Transport>(
        &mut self,
        title: &str,
        description: &str,
        transport: &T,
    ) -> Result<(), CollectionError> {
        self.set_title(title);
        self.set_description(description);
        self.create(transport)
    }

    pub fn delete<T: Transport>(&mut self, id: ItemId, transport: &T) -> Result<(), CollectionError> {
        let request = self.begin_delete(id)?;
        let outcome = transport.execute(request);
        self.finish_delete(outcome)
    }

    /// Probe health, then load the list.
    ///
    /// Both always run. The list fetch goes last, so `last_error` reflects
    /// its outcome; a failed probe is still visible through `Health`.
    pub fn initialize<T: Transport>(&mut self, transport: &T) -> Result<(), CollectionError> {
        let health = self.probe_health(transport);
        let fetch = self.fetch_items(transport);
        fetch.and(health)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn begin(&mut self, operation: Operation) -> Result<(), CollectionError> {
        if let Some(current) = self.in_flight {
            return Err(self.reject(current, operation));
        }
        debug!(%operation, "request started");
        self.in_flight = Some(operation);
        self.state.pending = true;
        self.state.last_error = None;
        Ok(())
    }

    fn reject(&self, current: Operation, requested: Operation) -> CollectionError {
        warn!(%current, %requested, "operation rejected while another is pending");
        CollectionError::Busy(current)
    }

    /// Clear `pending` if `expected` matches the operation in flight.
    fn release(
        &mut self,
        expected: impl Fn(&Operation) -> bool,
        name: &'static str,
    ) -> Result<Operation, CollectionError> {
        match self.in_flight {
            Some(operation) if expected(&operation) => {
                self.in_flight = None;
                self.state.pending = false;
                Ok(operation)
            }
            _ => Err(CollectionError::NotInFlight(name)),
        }
    }

    fn fail(&mut self, operation: Operation, source: ApiError) -> CollectionError {
        warn!(%operation, error = %source, "request failed");
        self.state.last_error = Some(operation.failure_message().to_string());
        CollectionError::Failed { operation, source }
    }
}

fn reject_duplicate_ids(items: Vec<Item>) -> Result<Vec<Item>, ApiError> {
    let mut seen = HashSet::with_capacity(items.len());
    if let Some(dup) = items.iter().find(|item| !seen.insert(item.id)) {
        return Err(ApiError::Deserialization(format!("duplicate item id {}", dup.id)));
    }
    Ok(items)
}
