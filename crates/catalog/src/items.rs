//! Ordered work-item mapping (work type → quantity).

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::WorkType;

/// One recorded work line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub work_type: WorkType,
    pub quantity: u32,
}

/// Work type → quantity, in first-recorded order.
///
/// Recording a work type again overwrites its quantity in place; a key is never
/// listed twice. Serializes as a JSON object (`{"<work>": <qty>, ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkItems {
    items: Vec<WorkItem>,
}

impl WorkItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the quantity for `work_type`.
    ///
    /// Returns the previous quantity if the work type was already recorded.
    pub fn record(&mut self, work_type: WorkType, quantity: u32) -> Option<u32> {
        match self.items.iter_mut().find(|i| i.work_type == work_type) {
            Some(existing) => Some(core::mem::replace(&mut existing.quantity, quantity)),
            None => {
                self.items.push(WorkItem { work_type, quantity });
                None
            }
        }
    }

    pub fn quantity_of(&self, work_type: &WorkType) -> Option<u32> {
        self.items
            .iter()
            .find(|i| &i.work_type == work_type)
            .map(|i| i.quantity)
    }

    pub fn contains(&self, work_type: &WorkType) -> bool {
        self.quantity_of(work_type).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(WorkType, u32)> for WorkItems {
    fn from_iter<T: IntoIterator<Item = (WorkType, u32)>>(iter: T) -> Self {
        let mut items = WorkItems::new();
        for (work_type, quantity) in iter {
            items.record(work_type, quantity);
        }
        items
    }
}

impl Serialize for WorkItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(item.work_type.as_str(), &item.quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WorkItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WorkItemsVisitor;

        impl<'de> Visitor<'de> for WorkItemsVisitor {
            type Value = WorkItems;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of work type to quantity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = WorkItems::new();
                while let Some((work_type, quantity)) = access.next_entry::<String, u32>()? {
                    items.record(WorkType::new(work_type), quantity);
                }
                Ok(items)
            }
        }

        deserializer.deserialize_map(WorkItemsVisitor)
    }
}
