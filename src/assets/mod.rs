//! Instrument reference data: the typed asset hierarchy and the registry
//! resolving names to shared references.
//!
//! Assets are immutable once registered and referenced elsewhere by
//! `Arc<Asset>`; name resolution happens once, at construction time, and
//! the core never looks a name up again past that point.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::BookError;
use crate::core::time::Day;
use crate::core::types::OptionDirection;

/// Static contract terms, tagged by instrument family.
#[derive(Debug, Clone)]
pub enum AssetKind {
    /// Cash instrument without derived terms (stock, index, commodity).
    General,
    /// Futures contract.
    Future {
        /// Maturity on the fractional-day clock.
        mature: Day,
        /// Deliverable underlying.
        underlying: Arc<Asset>,
    },
    /// Option contract.
    Option {
        /// Maturity on the fractional-day clock.
        mature: Day,
        /// Underlying whose price drives the option.
        underlying: Arc<Asset>,
        /// Exercise price.
        exercise: f64,
        /// Call or put.
        direction: OptionDirection,
    },
    Bond,
    Currency,
}

impl AssetKind {
    /// Numeric tag used on the serialization boundary.
    pub fn tag(&self) -> u8 {
        match self {
            Self::General => 0,
            Self::Future { .. } => 1,
            Self::Option { .. } => 2,
            Self::Bond => 3,
            Self::Currency => 4,
        }
    }
}

/// One registered instrument.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Unique registry key.
    pub name: String,
    /// Contract terms.
    pub kind: AssetKind,
}

impl Asset {
    /// A general cash instrument.
    pub fn general(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::General,
        }
    }

    /// A futures contract on `underlying`.
    pub fn future(name: impl Into<String>, mature: Day, underlying: Arc<Asset>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::Future { mature, underlying },
        }
    }

    /// An option contract on `underlying`.
    pub fn option(
        name: impl Into<String>,
        mature: Day,
        underlying: Arc<Asset>,
        exercise: f64,
        direction: OptionDirection,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::Option {
                mature,
                underlying,
                exercise,
                direction,
            },
        }
    }

    /// Maturity day, for futures and options.
    pub fn mature(&self) -> Option<Day> {
        match &self.kind {
            AssetKind::Future { mature, .. } | AssetKind::Option { mature, .. } => Some(*mature),
            _ => None,
        }
    }

    /// Underlying reference, for futures and options.
    pub fn underlying(&self) -> Option<&Arc<Asset>> {
        match &self.kind {
            AssetKind::Future { underlying, .. } | AssetKind::Option { underlying, .. } => {
                Some(underlying)
            }
            _ => None,
        }
    }

    /// Exercise price, for options.
    pub fn exercise(&self) -> Option<f64> {
        match &self.kind {
            AssetKind::Option { exercise, .. } => Some(*exercise),
            _ => None,
        }
    }

    /// Option side, for options.
    pub fn direction(&self) -> Option<OptionDirection> {
        match &self.kind {
            AssetKind::Option { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Name-keyed instrument registry.
///
/// Explicitly constructed and passed into whatever needs name resolution;
/// nothing in the crate holds a process-wide table.
///
/// # Examples
/// ```
/// use ferrobook::assets::{Asset, AssetRegistry};
///
/// let mut registry = AssetRegistry::new();
/// let gold = registry.register(Asset::general("AU"));
/// assert!(registry.exists("AU"));
/// assert_eq!(registry.find("AU").unwrap().name, gold.name);
/// assert!(registry.find("AG").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    pool: BTreeMap<String, Arc<Asset>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset and returns the shared reference the core will
    /// hold from now on. Re-registering a name replaces the entry but not
    /// references already handed out.
    pub fn register(&mut self, asset: Asset) -> Arc<Asset> {
        let asset = Arc::new(asset);
        self.pool.insert(asset.name.clone(), Arc::clone(&asset));
        asset
    }

    /// Resolves a name to its registered asset.
    pub fn find(&self, name: &str) -> Result<Arc<Asset>, BookError> {
        self.pool
            .get(name)
            .cloned()
            .ok_or_else(|| BookError::UnknownAsset(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.pool.contains_key(name)
    }

    /// Names from `names` that are not registered yet, in input order with
    /// duplicates removed.
    pub fn absent<'a, I: IntoIterator<Item = &'a str>>(&self, names: I) -> Vec<String> {
        let mut seen = Vec::new();
        for name in names {
            if !self.exists(name) && !seen.iter().any(|s| s == name) {
                seen.push(name.to_string());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_reports_the_missing_name() {
        let registry = AssetRegistry::new();
        let err = registry.find("CU2409").unwrap_err();
        assert_eq!(err.to_string(), "no asset 'CU2409' found");
    }

    #[test]
    fn option_terms_resolve_through_accessors() {
        let mut registry = AssetRegistry::new();
        let gold = registry.register(Asset::general("AU"));
        let future = registry.register(Asset::future("AU2412", 900.0, gold));
        let call = registry.register(Asset::option(
            "AU2412C560",
            900.0,
            Arc::clone(&future),
            560.0,
            OptionDirection::Call,
        ));

        assert_eq!(call.kind.tag(), 2);
        assert_eq!(call.exercise(), Some(560.0));
        assert_eq!(call.direction(), Some(OptionDirection::Call));
        assert_eq!(call.underlying().unwrap().name, "AU2412");
        assert_eq!(call.mature(), Some(900.0));
        assert_eq!(future.exercise(), None);
    }

    #[test]
    fn absent_filters_registered_names() {
        let mut registry = AssetRegistry::new();
        registry.register(Asset::general("AU"));
        let missing = registry.absent(["AU", "AG", "AG", "CU"]);
        assert_eq!(missing, vec!["AG".to_string(), "CU".to_string()]);
    }
}
