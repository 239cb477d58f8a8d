//! Built-in price list for electrical installation works.

use rust_decimal::Decimal;

use workact_core::DomainResult;

use crate::catalog::{MaterialRule, MaterialUnit, WorkCatalog, WorkCatalogEntry, WorkType};

pub const GYPSUM_BOX_INSTALL: &str = "Підрозетники (установка з гіпсом)";
pub const CABLE_LAYING: &str = "Прокладка кабелю";

/// Default electrician catalog: nine work types, gypsum and cable materials.
pub fn electrical_works() -> DomainResult<WorkCatalog> {
    let entries = vec![
        WorkCatalogEntry::new("Підрозетники (вибурювання)", 80),
        WorkCatalogEntry::new(GYPSUM_BOX_INSTALL, 50),
        WorkCatalogEntry::new("Штроблення (бетон)", 100),
        WorkCatalogEntry::new("Замазування штроби", 30),
        WorkCatalogEntry::new(CABLE_LAYING, 33),
        WorkCatalogEntry::new("Розподільча коробка (установка)", 100),
        WorkCatalogEntry::new("Розподільча коробка (розпайка)", 150),
        WorkCatalogEntry::new("Автомат (установка і розключення)", 100),
        WorkCatalogEntry::new("Щит (ніша, 48 модулів)", 800),
    ];

    let materials = vec![
        // 5 kg of gypsum per 15 boxes.
        MaterialRule {
            name: "Гіпс (5 кг на 15 підрозетників)".to_string(),
            related_work: WorkType::from(GYPSUM_BOX_INSTALL),
            rate: Decimal::from(5) / Decimal::from(15),
            unit_price: Decimal::from(20),
            unit: MaterialUnit::Kg,
        },
        MaterialRule {
            name: "Кабель ВВГнг (пог.м)".to_string(),
            related_work: WorkType::from(CABLE_LAYING),
            rate: Decimal::ONE,
            unit_price: Decimal::from(35),
            unit: MaterialUnit::M,
        },
    ];

    WorkCatalog::new(entries, materials)
}
