//! Tenant registry
//!
//! An immutable, ordered set of tenant definitions. Keys and application ids
//! are unique; lookups never mutate, so a registry can be shared across
//! threads without locking.
//!
//! # Example
//!
//! ```rust
//! use flavorkit_android::registry::TenantRegistry;
//! use flavorkit_android::tenant::TenantDefinition;
//!
//! let registry = TenantRegistry::load(vec![TenantDefinition::new(
//!     "afyakit",
//!     "com.afyakit.app",
//!     "AfyaKit",
//!     "afyakit.app",
//!     "www.afyakit.app",
//! )])?;
//!
//! assert_eq!(registry.get("afyakit")?.display_name, "AfyaKit");
//! # Ok::<(), flavorkit_android::error::TenantError>(())
//! ```

use crate::error::{TenantError, TenantResult};
use crate::tenant::TenantDefinition;
use once_cell::sync::OnceCell;
use std::collections::HashMap;

static GLOBAL: OnceCell<TenantRegistry> = OnceCell::new();

/// Ordered, read-only collection of tenants
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    tenants: Vec<TenantDefinition>,
    by_key: HashMap<String, usize>,
}

impl TenantRegistry {
    /// Build a registry, rejecting duplicate keys and application ids.
    ///
    /// Entries keep the order they were supplied in.
    ///
    /// # Errors
    ///
    /// [`TenantError::DuplicateKey`] or [`TenantError::DuplicateApplicationId`]
    /// for the first repeated entry.
    pub fn load<I>(entries: I) -> TenantResult<Self>
    where
        I: IntoIterator<Item = TenantDefinition>,
    {
        let mut tenants = Vec::new();
        let mut by_key = HashMap::new();
        let mut by_application_id: HashMap<String, usize> = HashMap::new();

        for tenant in entries {
            if by_key.contains_key(&tenant.key) {
                return Err(TenantError::DuplicateKey { key: tenant.key });
            }
            if let Some(&first) = by_application_id.get(&tenant.application_id) {
                let first: &TenantDefinition = &tenants[first];
                return Err(TenantError::DuplicateApplicationId {
                    application_id: tenant.application_id,
                    first: first.key.clone(),
                    second: tenant.key,
                });
            }

            let idx = tenants.len();
            by_key.insert(tenant.key.clone(), idx);
            by_application_id.insert(tenant.application_id.clone(), idx);
            tenants.push(tenant);
        }

        tracing::debug!(tenants = tenants.len(), "Tenant registry loaded");

        Ok(Self { tenants, by_key })
    }

    /// Look up a tenant by key
    ///
    /// # Errors
    ///
    /// [`TenantError::UnknownTenant`] when no tenant has this key.
    pub fn get(&self, key: &str) -> TenantResult<&TenantDefinition> {
        self.by_key
            .get(key)
            .map(|&idx| &self.tenants[idx])
            .ok_or_else(|| TenantError::UnknownTenant {
                key: key.to_string(),
            })
    }

    /// All tenants in load order
    #[must_use]
    pub fn all(&self) -> &[TenantDefinition] {
        &self.tenants
    }

    /// Tenant keys in load order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tenants.iter().map(|t| t.key.as_str())
    }

    /// Whether a tenant has this key
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of tenants
    #[must_use]
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Whether the registry has no tenants
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

impl<'a> IntoIterator for &'a TenantRegistry {
    type Item = &'a TenantDefinition;
    type IntoIter = std::slice::Iter<'a, TenantDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.tenants.iter()
    }
}

/// Install the process-wide registry. Only the first call succeeds.
///
/// # Errors
///
/// [`TenantError::GlobalAlreadyInstalled`] on every call after the first.
pub fn install_global(registry: TenantRegistry) -> TenantResult<&'static TenantRegistry> {
    GLOBAL
        .set(registry)
        .map_err(|_| TenantError::GlobalAlreadyInstalled)?;
    GLOBAL.get().ok_or(TenantError::GlobalAlreadyInstalled)
}

/// The process-wide registry, if one was installed
#[must_use]
pub fn global() -> Option<&'static TenantRegistry> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tenant(key: &str, application_id: &str) -> TenantDefinition {
        TenantDefinition::new(
            key,
            application_id,
            key.to_uppercase(),
            format!("{key}.app"),
            format!("www.{key}.app"),
        )
    }

    #[test]
    fn test_load_and_get() {
        let registry = TenantRegistry::load(vec![
            tenant("afyakit", "com.afyakit.app"),
            tenant("dawapap", "com.dawapap.app"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("dawapap").unwrap().application_id, "com.dawapap.app");
        assert!(registry.contains("afyakit"));
        assert!(!registry.contains("rpmoc"));
    }

    #[test]
    fn test_duplicate_key() {
        let err = TenantRegistry::load(vec![
            tenant("afyakit", "com.afyakit.app"),
            tenant("afyakit", "com.afyakit.other"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            TenantError::DuplicateKey {
                key: "afyakit".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_application_id() {
        let err = TenantRegistry::load(vec![
            tenant("afyakit", "com.afyakit.app"),
            tenant("rpmoc", "com.afyakit.app"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            TenantError::DuplicateApplicationId {
                application_id: "com.afyakit.app".to_string(),
                first: "afyakit".to_string(),
                second: "rpmoc".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_key_reported_before_application_id() {
        let err = TenantRegistry::load(vec![
            tenant("afyakit", "com.afyakit.app"),
            tenant("afyakit", "com.afyakit.app"),
        ])
        .unwrap_err();

        assert!(matches!(err, TenantError::DuplicateKey { .. }));
    }

    #[test]
    fn test_unknown_tenant() {
        let registry = TenantRegistry::load(vec![tenant("afyakit", "com.afyakit.app")]).unwrap();
        assert_eq!(
            registry.get("unknown").unwrap_err(),
            TenantError::UnknownTenant {
                key: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_all_preserves_load_order() {
        let registry = TenantRegistry::load(vec![
            tenant("rpmoc", "com.rpmoc.app"),
            tenant("afyakit", "com.afyakit.app"),
            tenant("danabtmc", "com.danabtmc.app"),
        ])
        .unwrap();

        let first: Vec<&str> = registry.all().iter().map(|t| t.key.as_str()).collect();
        let second: Vec<&str> = registry.keys().collect();
        assert_eq!(first, vec!["rpmoc", "afyakit", "danabtmc"]);
        assert_eq!(first, second);
        assert_eq!(registry.all(), registry.all());
    }

    #[test]
    fn test_empty_registry() {
        let registry = TenantRegistry::load(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn test_global_install_once() {
        let registry = TenantRegistry::load(vec![tenant("afyakit", "com.afyakit.app")]).unwrap();
        let installed = install_global(registry).unwrap();
        assert!(installed.contains("afyakit"));
        assert!(global().is_some());

        let again = install_global(TenantRegistry::default()).unwrap_err();
        assert_eq!(again, TenantError::GlobalAlreadyInstalled);
        assert!(global().unwrap().contains("afyakit"));
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TenantRegistry>();
    }

    proptest! {
        #[test]
        fn prop_unique_entries_load_and_resolve(keys in prop::collection::btree_set("[a-z]{1,12}", 0..20)) {
            let entries: Vec<TenantDefinition> = keys
                .iter()
                .map(|k| tenant(k, &format!("com.{k}.app")))
                .collect();

            let registry = TenantRegistry::load(entries.clone()).unwrap();

            prop_assert_eq!(registry.all(), entries.as_slice());
            for entry in &entries {
                prop_assert_eq!(registry.get(&entry.key).unwrap(), entry);
            }
        }

        #[test]
        fn prop_repeated_key_rejected(keys in prop::collection::btree_set("[a-z]{1,12}", 1..10), pick in any::<prop::sample::Index>()) {
            let keys: Vec<&String> = keys.iter().collect();
            let dup = keys[pick.index(keys.len())];

            let mut entries: Vec<TenantDefinition> = keys
                .iter()
                .map(|k| tenant(k, &format!("com.{k}.app")))
                .collect();
            entries.push(tenant(dup, "org.duplicate.app"));

            let is_duplicate_key = matches!(
                TenantRegistry::load(entries),
                Err(TenantError::DuplicateKey { ref key }) if key == dup
            );
            prop_assert!(is_duplicate_key);
        }
    }
}
