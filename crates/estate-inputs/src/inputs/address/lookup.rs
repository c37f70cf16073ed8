//! Postal code autofill collaborator and the ticket protocol guarding it.
//!
//! A lookup is issued as a [`LookupTicket`] tagged with the postal code it was
//! requested for. The widget is never borrowed while the lookup is in flight;
//! the resolved [`LookupResolution`] is handed back to
//! [`AddressInput::apply_lookup`](super::AddressInput::apply_lookup), which
//! discards it if the postal code changed in the meantime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalPlace {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("postal code service unavailable: {0}")]
    Unavailable(String),
    #[error("postal code lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// External reference-data service resolving a postal code to a place.
pub trait PostalCodeLookup: Send + Sync {
    fn lookup(
        &self,
        postal_code: &str,
    ) -> impl Future<Output = Result<Option<PostalPlace>, LookupError>> + Send;
}

/// In-flight lookup, tagged with the postal code it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    postal_code: String,
}

impl LookupTicket {
    pub(crate) fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
        }
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResolution {
    pub ticket: LookupTicket,
    pub result: Result<Option<PostalPlace>, LookupError>,
}

/// What [`AddressInput::apply_lookup`](super::AddressInput::apply_lookup) did
/// with a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Applied(PostalPlace),
    NotFound,
    /// The postal code changed after the lookup was issued.
    Stale,
    Failed(LookupError),
}

/// Runs one lookup. There is no retry; `timeout` bounds the wait when set.
pub async fn resolve_lookup<L>(
    lookup: &L,
    ticket: LookupTicket,
    timeout: Option<Duration>,
) -> LookupResolution
where
    L: PostalCodeLookup,
{
    let request = lookup.lookup(ticket.postal_code());
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(limit)),
        },
        None => request.await,
    };
    LookupResolution { ticket, result }
}

/// Fixed in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticPostalDirectory {
    places: BTreeMap<String, PostalPlace>,
}

impl StaticPostalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with a handful of major German cities.
    pub fn germany() -> Self {
        Self::new()
            .with("80331", "München", "Bayern")
            .with("10115", "Berlin", "Berlin")
            .with("20095", "Hamburg", "Hamburg")
            .with("50667", "Köln", "Nordrhein-Westfalen")
            .with("60311", "Frankfurt am Main", "Hessen")
    }

    pub fn with(mut self, postal_code: &str, city: &str, state: &str) -> Self {
        self.places.insert(
            postal_code.to_string(),
            PostalPlace {
                city: city.to_string(),
                state: state.to_string(),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PostalCodeLookup for StaticPostalDirectory {
    fn lookup(
        &self,
        postal_code: &str,
    ) -> impl Future<Output = Result<Option<PostalPlace>, LookupError>> + Send {
        let place = self.places.get(postal_code).cloned();
        async move { Ok(place) }
    }
}
