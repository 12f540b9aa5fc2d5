//! ProfileStore: activated routing profiles shared with search threads

use crate::attribute::AttributeRegistry;
use crate::model::Profile;
use crate::priority::{CompileResult, PriorityEvaluator};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// A profile that compiled successfully and is available for search
#[derive(Debug, Clone)]
pub struct ActiveProfile {
    /// Profile name
    pub name: String,
    /// Shared, immutable evaluator
    pub evaluator: Arc<PriorityEvaluator>,
    /// When the profile was activated
    pub activated_at: DateTime<Utc>,
}

/// Concurrent registry of activated profiles
///
/// Compilation happens before the store is touched, so a profile that fails
/// to compile never replaces (or removes) an earlier activation of the same
/// name.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: DashMap<String, ActiveProfile>,
}

impl ProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
        }
    }

    /// Compile a profile and make it available under its name
    ///
    /// Replaces any previous activation with the same name.
    pub fn activate<R>(&self, profile: &Profile, registry: &R) -> CompileResult<Arc<PriorityEvaluator>>
    where
        R: AttributeRegistry + ?Sized,
    {
        let evaluator = match PriorityEvaluator::compile(&profile.priority, registry) {
            Ok(evaluator) => Arc::new(evaluator),
            Err(e) => {
                tracing::warn!(profile = %profile.name, error = %e, "profile rejected");
                return Err(e);
            }
        };

        let active = ActiveProfile {
            name: profile.name.clone(),
            evaluator: Arc::clone(&evaluator),
            activated_at: Utc::now(),
        };
        if self.profiles.insert(profile.name.clone(), active).is_some() {
            tracing::info!(profile = %profile.name, "replaced active profile");
        } else {
            tracing::info!(profile = %profile.name, "activated profile");
        }
        Ok(evaluator)
    }

    /// Evaluator of an active profile
    pub fn get(&self, name: &str) -> Option<Arc<PriorityEvaluator>> {
        self.profiles.get(name).map(|r| Arc::clone(&r.evaluator))
    }

    /// Full activation record of a profile
    pub fn activation(&self, name: &str) -> Option<ActiveProfile> {
        self.profiles.get(name).map(|r| r.clone())
    }

    /// Remove a profile; evaluators already handed out stay valid
    pub fn deactivate(&self, name: &str) -> Option<ActiveProfile> {
        self.profiles.remove(name).map(|(_, active)| active)
    }

    /// Names of active profiles, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{road, AttributeSet};
    use crate::model::{FactorTable, ModelSpecification};

    fn profile(name: &str, factor: f64) -> Profile {
        Profile::new(name).with_priority(
            ModelSpecification::new().with(road::ROAD_CLASS, FactorTable::new().with("*", factor)),
        )
    }

    #[test]
    fn test_create_store() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_activate_profile() {
        let store = ProfileStore::new();
        let registry = AttributeSet::road_defaults();

        let evaluator = store.activate(&profile("car", 0.5), &registry).unwrap();
        assert_eq!(evaluator.model().len(), 1);
        assert!(store.contains("car"));
        assert!(Arc::ptr_eq(&evaluator, &store.get("car").unwrap()));
    }

    #[test]
    fn test_failed_activation_keeps_previous() {
        let store = ProfileStore::new();
        let registry = AttributeSet::road_defaults();

        let first = store.activate(&profile("car", 0.5), &registry).unwrap();
        assert!(store.activate(&profile("car", 1.5), &registry).is_err());

        let current = store.get("car").unwrap();
        assert!(Arc::ptr_eq(&first, &current));
    }

    #[test]
    fn test_failed_activation_adds_nothing() {
        let store = ProfileStore::new();
        let registry = AttributeSet::road_defaults();

        assert!(store.activate(&profile("bike", -0.1), &registry).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reactivation_replaces() {
        let store = ProfileStore::new();
        let registry = AttributeSet::road_defaults();

        let first = store.activate(&profile("car", 0.5), &registry).unwrap();
        let second = store.activate(&profile("car", 0.2), &registry).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
        assert!(store.activation("car").unwrap().activated_at <= Utc::now());
    }

    #[test]
    fn test_deactivate_and_list() {
        let store = ProfileStore::new();
        let registry = AttributeSet::road_defaults();
        store.activate(&profile("foot", 0.9), &registry).unwrap();
        store.activate(&profile("bike", 0.8), &registry).unwrap();
        let held = store.get("bike").unwrap();

        assert_eq!(store.list(), vec!["bike".to_string(), "foot".to_string()]);

        let removed = store.deactivate("bike").unwrap();
        assert_eq!(removed.name, "bike");
        assert!(store.get("bike").is_none());
        assert_eq!(held.model().len(), 1);
        assert!(store.deactivate("bike").is_none());
    }
}
