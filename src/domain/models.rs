use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

/// Record id of the single persisted dropdown state.
pub const STATE_RECORD_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub color: String,
}

impl Stage {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funnel {
    pub name: String,
    pub stages: Vec<Stage>,
    pub expanded: bool,
}

impl Funnel {
    pub fn new(name: &str, stages: Vec<Stage>) -> Self {
        Self {
            name: name.to_string(),
            stages,
            expanded: false,
        }
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub funnels: Vec<Funnel>,
}

impl Catalog {
    pub fn new(funnels: Vec<Funnel>) -> Self {
        Self { funnels }
    }

    pub fn funnel(&self, name: &str) -> Option<&Funnel> {
        self.funnels.iter().find(|funnel| funnel.name == name)
    }

    pub fn funnel_mut(&mut self, name: &str) -> Option<&mut Funnel> {
        self.funnels.iter_mut().find(|funnel| funnel.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            funnels: vec![
                Funnel::new("Продажи", standard_stages()),
                Funnel::new("Сотрудники", standard_stages()),
                Funnel::new("Партнеры", standard_stages()),
                Funnel::new("Ивент", standard_stages()),
                Funnel::new("Входящие обращения", standard_stages()),
            ],
        }
    }
}

fn standard_stages() -> Vec<Stage> {
    vec![
        Stage::new("Неразобранное", "#99CCFD"),
        Stage::new("Переговоры", "#FFFF99"),
        Stage::new("Принимают решение", "#FFCC66"),
        Stage::new("Успешно", "#CCFF66"),
    ]
}

/// Selected stage names grouped by funnel name. A funnel key is present only
/// while its set is non-empty; `remove` prunes emptied sets itself, so
/// callers never observe an empty set behind a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionIndex {
    selected: BTreeMap<String, BTreeSet<String>>,
}

impl SelectionIndex {
    pub fn insert(&mut self, funnel: &str, stage: &str) {
        self.selected
            .entry(funnel.to_string())
            .or_default()
            .insert(stage.to_string());
    }

    pub fn remove(&mut self, funnel: &str, stage: &str) {
        if let Some(stages) = self.selected.get_mut(funnel) {
            stages.remove(stage);
            if stages.is_empty() {
                self.selected.remove(funnel);
            }
        }
    }

    pub fn contains(&self, funnel: &str, stage: &str) -> bool {
        self.selected
            .get(funnel)
            .is_some_and(|stages| stages.contains(stage))
    }

    pub fn selected_stages(&self, funnel: &str) -> Option<&BTreeSet<String>> {
        self.selected.get(funnel)
    }

    pub fn funnel_count(&self) -> usize {
        self.selected.len()
    }

    pub fn stage_count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    pub fn has_any(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn to_state(&self) -> DropdownState {
        DropdownState {
            id: STATE_RECORD_ID,
            selected_items: self
                .selected
                .iter()
                .map(|(funnel, stages)| CategorySelection {
                    category: funnel.clone(),
                    selected: stages.iter().cloned().collect(),
                })
                .collect(),
        }
    }

    pub fn from_state(state: &DropdownState) -> Self {
        let mut index = Self::default();
        for item in &state.selected_items {
            // An empty list in a hand-edited record must not become an
            // empty set behind a key.
            if item.selected.is_empty() {
                continue;
            }
            index.selected.insert(
                item.category.clone(),
                item.selected.iter().cloned().collect(),
            );
        }
        index
    }
}

/// The persisted record. Field names follow the storage schema:
/// `{ "id": 1, "selectedItems": [ { "category": ..., "selected": [...] } ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownState {
    pub id: u32,
    pub selected_items: Vec<CategorySelection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub category: String,
    pub selected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_prunes_empty_set() {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Переговоры");
        assert_eq!(index.funnel_count(), 1);

        index.remove("Продажи", "Переговоры");
        assert_eq!(index.funnel_count(), 0);
        assert!(index.selected_stages("Продажи").is_none());
        assert!(!index.has_any());
    }

    #[test]
    fn test_remove_keeps_non_empty_set() {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Переговоры");
        index.insert("Продажи", "Успешно");

        index.remove("Продажи", "Переговоры");
        assert_eq!(index.funnel_count(), 1);
        assert_eq!(index.stage_count(), 1);
        assert!(index.contains("Продажи", "Успешно"));
    }

    #[test]
    fn test_counts_span_funnels() {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Переговоры");
        index.insert("Продажи", "Успешно");
        index.insert("Партнеры", "Успешно");

        assert_eq!(index.funnel_count(), 2);
        assert_eq!(index.stage_count(), 3);
    }

    #[test]
    fn test_state_round_trip_preserves_sets() {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Успешно");
        index.insert("Продажи", "Переговоры");
        index.insert("Ивент", "Неразобранное");

        let state = index.to_state();
        assert_eq!(state.id, STATE_RECORD_ID);

        let restored = SelectionIndex::from_state(&state);
        assert_eq!(restored, index);
    }

    #[test]
    fn test_from_state_skips_empty_lists() {
        let state = DropdownState {
            id: STATE_RECORD_ID,
            selected_items: vec![
                CategorySelection {
                    category: "Продажи".to_string(),
                    selected: vec![],
                },
                CategorySelection {
                    category: "Ивент".to_string(),
                    selected: vec!["Успешно".to_string()],
                },
            ],
        };

        let index = SelectionIndex::from_state(&state);
        assert_eq!(index.funnel_count(), 1);
        assert!(index.selected_stages("Продажи").is_none());
        assert!(index.contains("Ивент", "Успешно"));
    }

    #[test]
    fn test_state_serializes_with_schema_names() {
        let mut index = SelectionIndex::default();
        index.insert("Продажи", "Успешно");

        let json = serde_json::to_string(&index.to_state()).unwrap();
        assert!(json.contains("\"selectedItems\""));
        assert!(json.contains("\"category\""));
        assert!(json.contains("\"selected\""));
        assert!(json.contains("\"id\":1"));
    }

    #[test]
    fn test_default_catalog_shape() {
        let catalog = Catalog::default();
        assert_eq!(catalog.funnels.len(), 5);
        assert!(catalog.funnel("Продажи").is_some());
        assert!(catalog.funnel("Нет такой").is_none());
        for funnel in &catalog.funnels {
            assert_eq!(funnel.stages.len(), 4);
            assert!(!funnel.expanded);
        }
        let first = &catalog.funnels[0].stages[0];
        assert_eq!(first.name, "Неразобранное");
        assert_eq!(first.color, "#99CCFD");
    }
}
