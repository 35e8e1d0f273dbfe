use std::time::Duration;

use crate::cancel::CancelToken;
use crate::countries::Country;
use crate::debounce::Debouncer;
use crate::error::AppError;

/// How long a query must sit unchanged before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Fixed user-facing message for any failed search.
pub const SEARCH_ERROR_MESSAGE: &str = "No countries found or network error.";

/// Outcome of a committed (non-superseded) search.
#[derive(Debug)]
pub enum SearchUpdate {
    Results(Vec<Country>),
    Failed,
}

/// Tracks one user's search flow: debounced query input plus the single
/// in-flight lookup allowed at a time.
///
/// Each `begin` cancels the previous lookup's token before handing out a
/// fresh one, and `commit` refuses results carrying a cancelled token. Taken
/// together this guarantees that the visible result list only ever reflects
/// the most recently issued query, no matter the order responses arrive in.
pub struct SearchSession {
    debouncer: Debouncer<String>,
    in_flight: Option<CancelToken>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::with_delay(SEARCH_DEBOUNCE)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            in_flight: None,
        }
    }

    /// Feeds one raw query change into the debouncer.
    pub fn input(&mut self, query: String) {
        self.debouncer.push(query);
    }

    /// Resolves with the query once it has been stable for the debounce
    /// delay. Pending forever when nothing has been typed.
    pub async fn settled(&mut self) -> String {
        self.debouncer.settled().await
    }

    /// Starts a new lookup, superseding any in-flight one. The returned
    /// token travels with the request and is checked again at commit time.
    pub fn begin(&mut self) -> CancelToken {
        self.cancel_pending();
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        token
    }

    /// Applies a completed lookup. Returns `None` when the token was
    /// cancelled in the meantime; such late results must not touch state.
    pub fn commit(
        &mut self,
        token: &CancelToken,
        result: Result<Vec<Country>, AppError>,
    ) -> Option<SearchUpdate> {
        if token.is_cancelled() {
            return None;
        }
        self.in_flight = None;
        Some(match result {
            Ok(countries) => SearchUpdate::Results(countries),
            Err(_) => SearchUpdate::Failed,
        })
    }

    /// True while a lookup is in flight and not yet superseded.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cancels the in-flight lookup, if any. Used both on supersede and when
    /// the search view is torn down by a country selection.
    pub fn cancel_pending(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use tokio::time::advance;

    fn results(codes: &[&str]) -> Vec<Country> {
        codes
            .iter()
            .map(|code| Country {
                common_name: code.to_string(),
                code: code.to_string(),
                timezone_ids: vec!["UTC".to_string()],
                flag_image_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut session = SearchSession::new();

        let first = session.begin();
        let second = session.begin();

        // The older response arrives after being superseded: dropped.
        assert!(session.commit(&first, Ok(results(&["IN"]))).is_none());

        // The newest one commits.
        match session.commit(&second, Ok(results(&["ID"]))) {
            Some(SearchUpdate::Results(countries)) => assert_eq!(countries[0].code, "ID"),
            other => panic!("expected results, got {:?}", other),
        }
        assert!(!session.is_searching());
    }

    #[test]
    fn out_of_order_arrival_keeps_newest_only() {
        let mut session = SearchSession::new();

        let first = session.begin();
        let second = session.begin();

        // Newest response arrives first and commits.
        assert!(session.commit(&second, Ok(results(&["ID"]))).is_some());
        // The older one shows up afterwards and is still refused.
        assert!(session.commit(&first, Ok(results(&["IN"]))).is_none());
    }

    #[test]
    fn failure_commits_as_failed_update() {
        let mut session = SearchSession::new();
        let token = session.begin();

        let outcome = session.commit(
            &token,
            Err(AppError::ApiRequestFailed("404 Not Found".to_string())),
        );
        assert!(matches!(outcome, Some(SearchUpdate::Failed)));
    }

    #[test]
    fn teardown_cancels_in_flight_lookup() {
        let mut session = SearchSession::new();
        let token = session.begin();
        assert!(session.is_searching());

        session.cancel_pending();
        assert!(!session.is_searching());
        assert!(session.commit(&token, Ok(results(&["IN"]))).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_settles_to_one_query() {
        let mut session = SearchSession::new();

        for query in ["i", "in", "ind", "india"] {
            session.input(query.to_string());
            advance(Duration::from_millis(50)).await;
        }
        assert!(session.settled().now_or_never().is_none());

        advance(SEARCH_DEBOUNCE).await;
        assert_eq!(session.settled().await, "india");
        assert!(session.settled().now_or_never().is_none());
    }
}
