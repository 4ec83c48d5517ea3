//! Resolve-then-fetch, shared by the HTTP and live handlers.

use std::time::Duration;

use crate::location::{Endpoint, GeoCoordinate, LocationResolver, ResolveError};
use crate::maps::MapsError;
use crate::resilience::with_deadline;
use crate::route::aggregator::{RouteAggregator, RouteCandidate};
use crate::route::error::RouteError;
use crate::route::request::RouteQuery;

#[derive(Clone)]
pub struct RoutePlanner {
    resolver: LocationResolver,
    aggregator: RouteAggregator,
    deadline: Duration,
}

impl RoutePlanner {
    /// `deadline` bounds one whole plan: both resolutions plus directions.
    pub fn new(resolver: LocationResolver, aggregator: RouteAggregator, deadline: Duration) -> Self {
        Self { resolver, aggregator, deadline }
    }

    /// Resolve both ends concurrently, then ask for directions.
    ///
    /// A start failure is reported ahead of an end failure. Directions are
    /// never requested unless both ends resolved.
    pub async fn plan(&self, query: &RouteQuery) -> Result<Vec<RouteCandidate>, RouteError> {
        self.plan_within_deadline(query, Endpoint::Start).await
    }

    /// Same as [`plan`](Self::plan), but an end failure is reported ahead
    /// of a start failure, so a live client learns about a bad destination
    /// even while its current location is also unusable.
    pub async fn plan_live(&self, query: &RouteQuery) -> Result<Vec<RouteCandidate>, RouteError> {
        self.plan_within_deadline(query, Endpoint::End).await
    }

    async fn plan_within_deadline(
        &self,
        query: &RouteQuery,
        reported_first: Endpoint,
    ) -> Result<Vec<RouteCandidate>, RouteError> {
        with_deadline(self.deadline, self.resolve_and_fetch(query, reported_first))
            .await
            .unwrap_or_else(|elapsed| {
                tracing::warn!(deadline = ?elapsed.0, "Route planning exceeded its deadline");
                Err(RouteError::Transport(MapsError::Timeout(elapsed.0)))
            })
    }

    async fn resolve_and_fetch(
        &self,
        query: &RouteQuery,
        reported_first: Endpoint,
    ) -> Result<Vec<RouteCandidate>, RouteError> {
        let (start, end) = tokio::join!(
            self.resolver.resolve_start(&query.start),
            self.resolver.resolve_end(&query.end),
        );
        let (start, end) = match reported_first {
            Endpoint::Start => {
                let start = unresolved(Endpoint::Start, start)?;
                (start, unresolved(Endpoint::End, end)?)
            }
            Endpoint::End => {
                let end = unresolved(Endpoint::End, end)?;
                (unresolved(Endpoint::Start, start)?, end)
            }
        };

        tracing::debug!(
            start = %start.query_value(),
            end = %end.query_value(),
            mode = %query.mode,
            "Locations resolved"
        );
        self.aggregator.fetch_routes(start, end, query.mode).await
    }
}

fn unresolved(
    endpoint: Endpoint,
    result: Result<GeoCoordinate, ResolveError>,
) -> Result<GeoCoordinate, RouteError> {
    result.map_err(|source| RouteError::LocationUnresolved { endpoint, source })
}
