use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use workact_catalog::{MaterialUnit, WorkCatalog, WorkItems, WorkType};
use workact_core::{DomainError, DomainResult};

/// Labor line: recorded quantity of one work type at its catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborLine {
    pub work_type: WorkType,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub cost: Decimal,
}

/// Material line derived from a work line through a material rule.
///
/// Listed whenever the related work type is present, even at quantity 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub name: String,
    pub quantity: Decimal,
    pub unit: MaterialUnit,
    pub unit_price: Decimal,
    /// Rounded to whole currency units.
    pub cost: Decimal,
}

/// Priced breakdown of an order, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub labor: Vec<LaborLine>,
    pub materials: Vec<MaterialLine>,
    pub labor_total: Decimal,
    pub materials_total: Decimal,
    pub grand_total: Decimal,
}

/// Price recorded work items against a catalog.
///
/// - labor lines keep work-item order, material lines keep catalog rule order;
/// - material cost is rounded half-to-even to whole currency units;
/// - a work type missing from the catalog is an invariant violation.
pub fn price_order(works: &WorkItems, catalog: &WorkCatalog) -> DomainResult<PricedOrder> {
    let mut labor = Vec::with_capacity(works.len());
    let mut labor_total = Decimal::ZERO;

    for item in works.iter() {
        let unit_price = catalog.price_of(&item.work_type).ok_or_else(|| {
            DomainError::invariant(format!("work type '{}' is not in the catalog", item.work_type))
        })?;
        let cost = Decimal::from(item.quantity) * unit_price;
        labor_total += cost;
        labor.push(LaborLine {
            work_type: item.work_type.clone(),
            quantity: item.quantity,
            unit_price,
            cost,
        });
    }

    let mut materials = Vec::new();
    let mut materials_total = Decimal::ZERO;

    for rule in catalog.materials() {
        let Some(work_quantity) = works.quantity_of(&rule.related_work) else {
            continue;
        };
        let quantity = Decimal::from(work_quantity) * rule.rate;
        let cost = round_currency(quantity * rule.unit_price);
        materials_total += cost;
        materials.push(MaterialLine {
            name: rule.name.clone(),
            quantity,
            unit: rule.unit,
            unit_price: rule.unit_price,
            cost,
        });
    }

    Ok(PricedOrder {
        labor,
        materials,
        labor_total,
        materials_total,
        grand_total: labor_total + materials_total,
    })
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}
