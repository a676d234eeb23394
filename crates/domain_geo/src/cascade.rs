//! Department→city cascade state machine
//!
//! Each of the three department fields (store, personal, company) drives its
//! own independent cascade; they share no loading state and no cached lists.
//! Per cascade the lifecycle is:
//!
//! ```text
//! Idle → Loading{department} → Ready{department, cities}
//!              │                        │
//!              └── (department changes) ┘ → Loading{new department} → …
//! ```
//!
//! Every in-flight fetch is keyed to the department value that triggered it.
//! A resolution whose key no longer matches the cascade's current department
//! is discarded, so a slow response for an earlier selection can never
//! overwrite the list that belongs to the current one. There is no network
//! cancellation; staleness is handled entirely by this guard.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which department field drives a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoScope {
    Store,
    Personal,
    Company,
}

impl GeoScope {
    /// All three scopes, for iteration
    pub const ALL: [GeoScope; 3] = [GeoScope::Store, GeoScope::Personal, GeoScope::Company];
}

/// State of one department→city cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeState {
    /// No department selected, or the last fetch failed
    Idle,
    /// A fetch keyed to this department is in flight
    Loading { department: String },
    /// The city list for this department is available
    Ready {
        department: String,
        cities: Vec<String>,
    },
}

/// One department→city cascade
#[derive(Debug, Clone)]
pub struct CityCascade {
    scope: GeoScope,
    state: CascadeState,
}

impl CityCascade {
    pub fn new(scope: GeoScope) -> Self {
        Self {
            scope,
            state: CascadeState::Idle,
        }
    }

    pub fn scope(&self) -> GeoScope {
        self.scope
    }

    pub fn state(&self) -> &CascadeState {
        &self.state
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.state, CascadeState::Loading { .. })
    }

    /// The available city options; empty unless the cascade is `Ready`
    pub fn cities(&self) -> &[String] {
        match &self.state {
            CascadeState::Ready { cities, .. } => cities,
            _ => &[],
        }
    }

    /// The department the cascade is currently keyed to, if any
    pub fn current_department(&self) -> Option<&str> {
        match &self.state {
            CascadeState::Idle => None,
            CascadeState::Loading { department } => Some(department),
            CascadeState::Ready { department, .. } => Some(department),
        }
    }

    /// Enters `Loading` keyed to the newly selected department
    ///
    /// Re-selecting the identical department also re-enters `Loading`: the
    /// previous list is dropped and a fresh fetch is expected. Returns the
    /// key the caller must pass back to [`resolve`](Self::resolve) or
    /// [`fail`](Self::fail).
    pub fn begin(&mut self, department: impl Into<String>) -> String {
        let department = department.into();
        debug!(scope = ?self.scope, %department, "city fetch started");
        self.state = CascadeState::Loading {
            department: department.clone(),
        };
        department
    }

    /// Applies a resolved city list if its key still matches
    ///
    /// Returns `false` when the resolution was discarded as stale.
    pub fn resolve(&mut self, department: &str, cities: Vec<String>) -> bool {
        if self.current_department() != Some(department) {
            warn!(
                scope = ?self.scope,
                stale = %department,
                current = self.current_department().unwrap_or("<none>"),
                "discarding stale city response"
            );
            return false;
        }
        debug!(scope = ?self.scope, %department, count = cities.len(), "city fetch resolved");
        self.state = CascadeState::Ready {
            department: department.to_string(),
            cities,
        };
        true
    }

    /// Records a failed fetch if its key still matches
    ///
    /// The cascade returns to `Idle` with an empty list; the user can retry
    /// by re-selecting the department. Returns `false` when the failure was
    /// stale and ignored.
    pub fn fail(&mut self, department: &str) -> bool {
        if self.current_department() != Some(department) {
            return false;
        }
        warn!(scope = ?self.scope, %department, "city fetch failed, cascade reset");
        self.state = CascadeState::Idle;
        true
    }

    /// Drops any state, returning the cascade to `Idle`
    pub fn reset(&mut self) {
        self.state = CascadeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lifecycle_idle_loading_ready() {
        let mut cascade = CityCascade::new(GeoScope::Store);
        assert_eq!(cascade.state(), &CascadeState::Idle);
        assert!(cascade.cities().is_empty());

        let key = cascade.begin("Antioquia");
        assert!(cascade.is_loading());
        assert!(cascade.cities().is_empty());

        assert!(cascade.resolve(&key, cities(&["Medellín", "Envigado"])));
        assert!(!cascade.is_loading());
        assert_eq!(cascade.cities().len(), 2);
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let mut cascade = CityCascade::new(GeoScope::Personal);

        let first = cascade.begin("Antioquia");
        let second = cascade.begin("Cundinamarca");

        // The second fetch resolves first
        assert!(cascade.resolve(&second, cities(&["Bogotá", "Chía"])));
        // The first fetch's late response must not overwrite the list
        assert!(!cascade.resolve(&first, cities(&["Medellín"])));

        assert_eq!(cascade.current_department(), Some("Cundinamarca"));
        assert_eq!(cascade.cities(), &cities(&["Bogotá", "Chía"])[..]);
    }

    #[test]
    fn test_stale_resolution_while_still_loading() {
        let mut cascade = CityCascade::new(GeoScope::Company);
        let first = cascade.begin("Antioquia");
        cascade.begin("Valle del Cauca");

        // First response arrives while the second fetch is still in flight
        assert!(!cascade.resolve(&first, cities(&["Medellín"])));
        assert!(cascade.is_loading());
        assert!(cascade.cities().is_empty());
    }

    #[test]
    fn test_failure_returns_to_recoverable_idle() {
        let mut cascade = CityCascade::new(GeoScope::Store);
        let key = cascade.begin("Antioquia");
        assert!(cascade.fail(&key));
        assert_eq!(cascade.state(), &CascadeState::Idle);
        assert!(cascade.cities().is_empty());

        // Retrying by re-selecting works
        let key = cascade.begin("Antioquia");
        assert!(cascade.resolve(&key, cities(&["Medellín"])));
        assert_eq!(cascade.cities().len(), 1);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut cascade = CityCascade::new(GeoScope::Store);
        let first = cascade.begin("Antioquia");
        let second = cascade.begin("Cundinamarca");

        assert!(!cascade.fail(&first));
        assert!(cascade.is_loading());

        assert!(cascade.resolve(&second, cities(&["Bogotá"])));
        assert_eq!(cascade.cities().len(), 1);
    }

    #[test]
    fn test_reselecting_same_department_refetches() {
        let mut cascade = CityCascade::new(GeoScope::Store);
        let key = cascade.begin("Antioquia");
        cascade.resolve(&key, cities(&["Medellín"]));

        // A no-op re-selection drops the list and goes back to Loading
        let key = cascade.begin("Antioquia");
        assert!(cascade.is_loading());
        assert!(cascade.cities().is_empty());
        assert!(cascade.resolve(&key, cities(&["Medellín", "Envigado"])));
        assert_eq!(cascade.cities().len(), 2);
    }

    #[test]
    fn test_cascades_are_independent() {
        let mut store = CityCascade::new(GeoScope::Store);
        let mut personal = CityCascade::new(GeoScope::Personal);

        let store_key = store.begin("Antioquia");
        personal.begin("Cundinamarca");

        store.resolve(&store_key, cities(&["Medellín"]));
        assert!(!store.is_loading());
        assert!(personal.is_loading());
        assert!(personal.cities().is_empty());
    }
}
