use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use workact_core::{DomainError, DomainResult};

/// Work type name; the unique key of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkType(String);

impl WorkType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WorkType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Catalog entry: work type and its price per unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCatalogEntry {
    pub work_type: WorkType,
    /// Price in whole currency units (UAH).
    pub unit_price: Decimal,
}

impl WorkCatalogEntry {
    pub fn new(work_type: impl Into<WorkType>, unit_price: impl Into<Decimal>) -> Self {
        Self {
            work_type: work_type.into(),
            unit_price: unit_price.into(),
        }
    }
}

/// Unit a material is measured and priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialUnit {
    Kg,
    M,
}

impl MaterialUnit {
    /// Short label used on printed documents.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialUnit::Kg => "кг",
            MaterialUnit::M => "м",
        }
    }
}

/// Consumable derived from a work type: `quantity = work quantity × rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRule {
    pub name: String,
    pub related_work: WorkType,
    /// Units of material consumed per unit of related work.
    pub rate: Decimal,
    /// Price per material unit, whole currency units.
    pub unit_price: Decimal,
    pub unit: MaterialUnit,
}

/// Immutable catalog of work prices and material rules.
///
/// Invariants (checked by [`WorkCatalog::new`]):
/// - work type names are unique,
/// - prices and rates are non-negative,
/// - material names are unique and every rule references a catalog work type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkCatalog {
    entries: Vec<WorkCatalogEntry>,
    materials: Vec<MaterialRule>,
}

impl WorkCatalog {
    pub fn new(entries: Vec<WorkCatalogEntry>, materials: Vec<MaterialRule>) -> DomainResult<Self> {
        let mut seen: HashSet<&WorkType> = HashSet::new();
        for entry in &entries {
            if entry.work_type.as_str().trim().is_empty() {
                return Err(DomainError::validation("work type name must not be empty"));
            }
            if entry.unit_price.is_sign_negative() {
                return Err(DomainError::validation(format!(
                    "price of '{}' must not be negative",
                    entry.work_type
                )));
            }
            if !seen.insert(&entry.work_type) {
                return Err(DomainError::invariant(format!(
                    "duplicate work type '{}'",
                    entry.work_type
                )));
            }
        }

        let mut material_names: HashSet<&str> = HashSet::new();
        for rule in &materials {
            if !material_names.insert(rule.name.as_str()) {
                return Err(DomainError::invariant(format!(
                    "duplicate material '{}'",
                    rule.name
                )));
            }
            if !seen.contains(&rule.related_work) {
                return Err(DomainError::invariant(format!(
                    "material '{}' references unknown work type '{}'",
                    rule.name, rule.related_work
                )));
            }
            if rule.rate.is_sign_negative() || rule.unit_price.is_sign_negative() {
                return Err(DomainError::validation(format!(
                    "rate and price of material '{}' must not be negative",
                    rule.name
                )));
            }
        }

        Ok(Self { entries, materials })
    }

    pub fn entries(&self) -> &[WorkCatalogEntry] {
        &self.entries
    }

    pub fn materials(&self) -> &[MaterialRule] {
        &self.materials
    }

    pub fn get(&self, work_type: &str) -> Option<&WorkCatalogEntry> {
        self.entries.iter().find(|e| e.work_type.as_str() == work_type)
    }

    pub fn contains(&self, work_type: &str) -> bool {
        self.get(work_type).is_some()
    }

    pub fn price_of(&self, work_type: &WorkType) -> Option<Decimal> {
        self.get(work_type.as_str()).map(|e| e.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cable_rule(related: &str) -> MaterialRule {
        MaterialRule {
            name: "Кабель".to_string(),
            related_work: WorkType::from(related),
            rate: Decimal::ONE,
            unit_price: Decimal::from(35),
            unit: MaterialUnit::M,
        }
    }

    #[test]
    fn lookup_by_name() {
        let catalog = WorkCatalog::new(
            vec![WorkCatalogEntry::new("Прокладка кабелю", 33)],
            vec![cable_rule("Прокладка кабелю")],
        )
        .unwrap();

        assert!(catalog.contains("Прокладка кабелю"));
        assert!(!catalog.contains("Штроблення (бетон)"));
        assert_eq!(
            catalog.price_of(&WorkType::from("Прокладка кабелю")),
            Some(Decimal::from(33))
        );
    }

    #[test]
    fn duplicate_work_types_are_rejected() {
        let err = WorkCatalog::new(
            vec![
                WorkCatalogEntry::new("A", 1),
                WorkCatalogEntry::new("A", 2),
            ],
            vec![],
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("duplicate work type") => {}
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn material_must_reference_catalog_work() {
        let err = WorkCatalog::new(
            vec![WorkCatalogEntry::new("A", 1)],
            vec![cable_rule("B")],
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("unknown work type 'B'") => {}
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn negative_prices_are_rejected() {
        let err = WorkCatalog::new(vec![WorkCatalogEntry::new("A", -1)], vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
