use crate::models::{Search, TempType};
use crate::services::gateway::WeatherSource;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, warn};
use uuid::Uuid;

/// How many searches the history queries hand back
pub const RECENT_SEARCH_LIMIT: usize = 5;

#[derive(Debug, Default)]
struct SearchState {
    /// Searches keyed by id; agrees with `search_order` at all times
    searches: HashMap<Uuid, Search>,
    /// Ids in insertion order; append-only except for removal
    search_order: Vec<Uuid>,
    /// Most recently completed search. Not cleared when that search is
    /// removed; resolution is absent-safe instead.
    last_search_id: Option<Uuid>,
    /// Search picked on the history page; same dangling caveat
    last_selected_id: Option<Uuid>,
}

/// Session-scoped store of weather searches.
///
/// Owns the ordered search collection and drives the request lifecycle: a
/// lookup is recorded the instant it starts, then either completed with the
/// provider response or removed again when the fetch fails. Commands are
/// guarded rather than fallible: a malformed payload logs a warning and
/// leaves the state untouched.
///
/// Each command and query takes the state mutex exactly once, so commands
/// are atomic relative to each other; `fetch_weather` never holds the lock
/// across its network await, which keeps independent lookups free to
/// interleave.
pub struct SearchStore {
    source: Arc<dyn WeatherSource>,
    state: Mutex<SearchState>,
}

impl SearchStore {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            state: Mutex::new(SearchState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Queries ---

    /// Ids of the last [`RECENT_SEARCH_LIMIT`] searches, oldest first
    pub fn recent_search_ids(&self) -> Vec<Uuid> {
        let state = self.state();
        let start = state.search_order.len().saturating_sub(RECENT_SEARCH_LIMIT);
        state.search_order[start..].to_vec()
    }

    /// The last [`RECENT_SEARCH_LIMIT`] searches, oldest first
    pub fn recent_searches(&self) -> Vec<Search> {
        let state = self.state();
        let start = state.search_order.len().saturating_sub(RECENT_SEARCH_LIMIT);
        state.search_order[start..]
            .iter()
            .filter_map(|id| state.searches.get(id).cloned())
            .collect()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Search> {
        self.state().searches.get(&id).cloned()
    }

    /// The most recently completed search, if it still exists
    pub fn last_search(&self) -> Option<Search> {
        let state = self.state();
        state
            .last_search_id
            .and_then(|id| state.searches.get(&id).cloned())
    }

    /// The search selected on the history page, if it still exists
    pub fn last_selected(&self) -> Option<Search> {
        let state = self.state();
        state
            .last_selected_id
            .and_then(|id| state.searches.get(&id).cloned())
    }

    pub fn accepted_temp_types(&self) -> &'static [TempType] {
        TempType::accepted()
    }

    // --- Commands ---

    /// Record the request data of a search the moment it is sent
    pub fn record_search(&self, id: Uuid, city_name: &str, temp_type: TempType) {
        if city_name.trim().is_empty() {
            warn!("Ignored search record {} without a city name", id);
            return;
        }

        let mut state = self.state();
        if state.searches.contains_key(&id) {
            warn!("Ignored duplicate search record {}", id);
            return;
        }

        state.searches.insert(id, Search::new(id, city_name, temp_type));
        state.search_order.push(id);
    }

    /// Record the response data of a successful search request
    pub fn record_response(&self, id: Uuid, response: Value) {
        let mut state = self.state();
        match state.searches.get_mut(&id) {
            Some(search) => search.response = Some(response),
            None => warn!("Unable to record response as search {} not found", id),
        }
    }

    /// Drop a search from both the map and the order list; no-op if absent
    pub fn remove_search(&self, id: Uuid) {
        let mut state = self.state();
        if state.searches.remove(&id).is_some() {
            state.search_order.retain(|other| *other != id);
        }
    }

    /// Overwrites unconditionally; the id is not checked against the
    /// collection.
    pub fn set_last_search_id(&self, id: Uuid) {
        self.state().last_search_id = Some(id);
    }

    /// Overwrites unconditionally; the id is not checked against the
    /// collection.
    pub fn set_selected_id(&self, id: Uuid) {
        self.state().last_selected_id = Some(id);
    }

    pub fn reset_selection(&self) {
        self.state().last_selected_id = None;
    }

    // --- Orchestration ---

    /// Run one weather lookup end to end.
    ///
    /// The search is recorded in flight before the source is called. On
    /// success the response and the last-search pointer are set under a
    /// single lock acquisition; on failure the in-flight record is removed
    /// again, so a failed fetch never leaves a dangling entry in the
    /// history. Returns the new search's id, or `None` on failure; the
    /// underlying error only goes to the log.
    pub async fn fetch_weather(&self, city_name: &str, temp_type: TempType) -> Option<Uuid> {
        if city_name.trim().is_empty() {
            warn!("Rejected weather lookup without a city name");
            return None;
        }

        let id = Uuid::new_v4();
        self.record_search(id, city_name, temp_type);

        match self.source.fetch_current(city_name).await {
            Ok(payload) => {
                self.complete_search(id, payload);
                Some(id)
            }
            Err(err) => {
                error!("Weather lookup for '{}' failed: {}", city_name, err);
                self.remove_search(id);
                None
            }
        }
    }

    /// Set the response and the last-search pointer together so no other
    /// command can observe one without the other.
    fn complete_search(&self, id: Uuid, payload: Value) {
        let mut state = self.state();
        match state.searches.get_mut(&id) {
            Some(search) => {
                search.response = Some(payload);
                state.last_search_id = Some(id);
            }
            None => warn!("Unable to record response as search {} not found", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use serde_json::json;

    /// Source double: hands back a canned payload or always fails
    struct StubSource {
        payload: Option<Value>,
    }

    #[async_trait]
    impl WeatherSource for StubSource {
        async fn fetch_current(&self, _city_name: &str) -> Result<Value, ApiError> {
            self.payload
                .clone()
                .ok_or_else(|| ApiError::ProviderUnreachable("stub is offline".to_string()))
        }
    }

    fn store_with_payload(payload: Value) -> SearchStore {
        SearchStore::new(Arc::new(StubSource {
            payload: Some(payload),
        }))
    }

    fn failing_store() -> SearchStore {
        SearchStore::new(Arc::new(StubSource { payload: None }))
    }

    #[test]
    fn test_recorded_search_is_in_flight() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();

        store.record_search(id, "shrewsbury", TempType::Celsius);

        let search = store.find_by_id(id).unwrap();
        assert!(search.is_in_flight());
        assert_eq!(search.city_name, "shrewsbury");
        assert_eq!(search.temp_type, TempType::Celsius);
    }

    #[test]
    fn test_blank_city_name_is_rejected() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();

        store.record_search(id, "   ", TempType::Celsius);

        assert!(store.find_by_id(id).is_none());
        assert!(store.recent_search_ids().is_empty());
    }

    #[test]
    fn test_duplicate_id_does_not_replace_existing_search() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();

        store.record_search(id, "london", TempType::Kelvin);
        store.record_search(id, "paris", TempType::Celsius);

        assert_eq!(store.find_by_id(id).unwrap().city_name, "london");
        assert_eq!(store.recent_search_ids().len(), 1);
    }

    #[test]
    fn test_unknown_id_operations_are_no_ops() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let unknown = Uuid::new_v4();

        assert!(store.find_by_id(unknown).is_none());
        store.record_response(unknown, json!({ "cod": 200 }));
        store.remove_search(unknown);

        assert!(store.recent_search_ids().is_empty());
    }

    #[test]
    fn test_remove_search_drops_map_and_order_together() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let keep = Uuid::new_v4();
        let removed = Uuid::new_v4();

        store.record_search(keep, "london", TempType::Celsius);
        store.record_search(removed, "paris", TempType::Celsius);
        store.remove_search(removed);

        assert!(store.find_by_id(removed).is_none());
        assert_eq!(store.recent_search_ids(), vec![keep]);
    }

    #[test]
    fn test_recent_search_ids_caps_at_limit_in_insertion_order() {
        let store = store_with_payload(json!({ "cod": 200 }));

        let ids: Vec<Uuid> = (0..8)
            .map(|n| {
                let id = Uuid::new_v4();
                store.record_search(id, &format!("city-{}", n), TempType::Celsius);
                id
            })
            .collect();

        let recent = store.recent_search_ids();
        assert_eq!(recent.len(), RECENT_SEARCH_LIMIT);
        assert_eq!(recent, ids[3..].to_vec());

        let searches = store.recent_searches();
        assert_eq!(searches.len(), RECENT_SEARCH_LIMIT);
        assert_eq!(searches[0].city_name, "city-3");
        assert_eq!(searches[4].city_name, "city-7");
    }

    #[test]
    fn test_recent_search_ids_returns_fewer_when_collection_is_small() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();
        store.record_search(id, "london", TempType::Celsius);

        assert_eq!(store.recent_search_ids(), vec![id]);
    }

    #[test]
    fn test_selection_is_independent_of_the_collection() {
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();
        store.record_search(id, "london", TempType::Celsius);

        store.set_selected_id(id);
        assert_eq!(store.last_selected().unwrap().id, id);

        store.reset_selection();
        assert!(store.last_selected().is_none());
    }

    #[test]
    fn test_dangling_pointers_resolve_absent_safe_after_removal() {
        // Removal does not cascade to the last-search/last-selected
        // pointers; the getters tolerate the dangling ids instead.
        let store = store_with_payload(json!({ "cod": 200 }));
        let id = Uuid::new_v4();

        store.record_search(id, "london", TempType::Celsius);
        store.set_last_search_id(id);
        store.set_selected_id(id);
        store.remove_search(id);

        assert!(store.last_search().is_none());
        assert!(store.last_selected().is_none());
    }

    #[tokio::test]
    async fn test_fetch_weather_completes_record_and_last_search() {
        let store = store_with_payload(json!({ "cod": 200, "name": "Shrewsbury" }));

        let id = store.fetch_weather("shrewsbury", TempType::Celsius).await.unwrap();

        let search = store.last_search().unwrap();
        assert_eq!(search.id, id);
        assert!(!search.is_in_flight());
        assert_eq!(search.response.unwrap()["cod"], 200);

        let order = store.recent_search_ids();
        assert_eq!(order.iter().filter(|other| **other == id).count(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_rolls_back_the_in_flight_record() {
        let store = failing_store();
        let earlier = Uuid::new_v4();
        store.record_search(earlier, "london", TempType::Celsius);
        let before = store.recent_search_ids();

        let outcome = store.fetch_weather("atlantis", TempType::Celsius).await;

        assert!(outcome.is_none());
        assert_eq!(store.recent_search_ids(), before);
        assert!(store.last_search().is_none());
    }

    #[tokio::test]
    async fn test_blank_city_fetch_mutates_nothing() {
        let store = store_with_payload(json!({ "cod": 200 }));

        let outcome = store.fetch_weather("  ", TempType::Celsius).await;

        assert!(outcome.is_none());
        assert!(store.recent_search_ids().is_empty());
        assert!(store.last_search().is_none());
    }

    #[test]
    fn test_accepted_temp_types_exposes_the_fixed_set() {
        let store = store_with_payload(json!({ "cod": 200 }));
        assert_eq!(store.accepted_temp_types(), TempType::accepted());
    }
}
