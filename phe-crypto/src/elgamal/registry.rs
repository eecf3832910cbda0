use crate::elgamal::curve::EcGroup;
use crate::errors::PheError;

use log::debug;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Curves known to this process, keyed by [`EcGroup::id`].
///
/// Compact EC ciphertexts carry only the curve id, so the receiving side must
/// enable the curve before decoding them. The registry is an explicit value
/// handed to deserializers; share it behind an `Arc` between kits.
#[derive(Debug, Default)]
pub struct CurveRegistry {
    groups: RwLock<HashMap<u64, Arc<EcGroup>>>,
}

impl CurveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `group` unless a group with the same id is already present.
    ///
    /// Returns the registered instance, which is the earlier one on repeat calls.
    pub fn enable_ec_group(&self, group: Arc<EcGroup>) -> Arc<EcGroup> {
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        let entry = groups.entry(group.id()).or_insert_with(|| {
            debug!(
                "enabled EC group {}/{} as {:#018x}",
                group.curve_name(),
                group.library_name(),
                group.id()
            );
            group
        });

        entry.clone()
    }

    pub fn lookup(&self, id: u64) -> Result<Arc<EcGroup>, PheError> {
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        groups.get(&id).cloned().ok_or(PheError::UnknownCurve(id))
    }

    pub fn contains(&self, id: u64) -> bool {
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        groups.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn test_lookup_before_and_after_enable() -> Result<(), PheError> {
        let registry = CurveRegistry::new();
        let group = Arc::new(EcGroup::ristretto255());

        assert!(matches!(
            registry.lookup(group.id()),
            Err(PheError::UnknownCurve(id)) if id == group.id()
        ));

        registry.enable_ec_group(group.clone());
        assert_eq!(registry.lookup(group.id())?, group);
        Ok(())
    }

    #[test]
    fn test_enable_is_idempotent() {
        let registry = CurveRegistry::new();
        let first = registry.enable_ec_group(Arc::new(EcGroup::ristretto255()));
        let second = registry.enable_ec_group(Arc::new(EcGroup::ristretto255()));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_enable_keeps_one_instance() -> Result<(), PheError> {
        let registry = Arc::new(CurveRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.enable_ec_group(Arc::new(EcGroup::ristretto255())))
            })
            .collect();

        let mut returned = Vec::new();
        for handle in handles {
            let group = handle
                .join()
                .map_err(|_| PheError::InvalidParameters("thread panicked".into()))?;
            returned.push(group);
        }

        let registered = registry.lookup(EcGroup::ristretto255().id())?;
        for group in returned {
            assert!(Arc::ptr_eq(&group, &registered));
        }
        Ok(())
    }
}
