//! # Pruning heuristics
//!
//! A [`Heuristic`] is consulted for every candidate successor before it joins
//! the search frontier. The crafting heuristic is not a distance estimate: it
//! answers `0.0` to keep a candidate and `f32::INFINITY` to discard it, which
//! turns the best-first search into a uniform-cost search over the part of the
//! state space that respects a table of holding limits.
//!
//! The limits live in a [`PruneConfig`] so the search engine stays free of any
//! knowledge about benches, axes or planks. They encode the observation that
//! crafting plans never need a second bench, a second axe or a large pile of
//! raw material. A goal that genuinely requires more than a limit allows is
//! unreachable under this heuristic; use [`ZeroHeuristic`] (or loosen the
//! config) for such goals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;
use crate::state::{ItemId, Items, State};

/// Scores a candidate successor reached by applying `recipe`.
pub trait Heuristic: Send + Sync {
    /// Returns the estimate for `state`, the state *after* `recipe` was
    /// applied. `f32::INFINITY` discards the candidate.
    fn estimate(&self, state: &State, recipe: &Recipe) -> f32;
}

/// Keeps every candidate, giving plain uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _state: &State, _recipe: &Recipe) -> f32 {
        0.0
    }
}

/// Holding limits for the crafting heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneConfig {
    /// Maximum quantity ever held, whatever recipe was applied.
    #[serde(default = "default_holding_caps")]
    pub holding_caps: BTreeMap<String, u32>,

    /// Interchangeable tools: once one member is held, recipes producing
    /// another member (or the same one) are discarded.
    #[serde(default = "default_exclusive_groups")]
    pub exclusive_groups: Vec<Vec<String>>,

    /// Ceiling for raw materials, checked only when a recipe produces them.
    #[serde(default = "default_bulk_ceilings")]
    pub bulk_ceilings: BTreeMap<String, u32>,
}

fn default_holding_caps() -> BTreeMap<String, u32> {
    [
        "bench",
        "furnace",
        "wooden_pickaxe",
        "stone_pickaxe",
        "iron_pickaxe",
    ]
    .iter()
    .map(|s| (s.to_string(), 1))
    .collect()
}

fn default_exclusive_groups() -> Vec<Vec<String>> {
    vec![["wooden_axe", "stone_axe", "iron_axe"]
        .iter()
        .map(|s| s.to_string())
        .collect()]
}

fn default_bulk_ceilings() -> BTreeMap<String, u32> {
    [
        ("coal", 1),
        ("cobble", 8),
        ("ingot", 6),
        ("ore", 1),
        ("plank", 6),
        ("stick", 6),
        ("wood", 1),
    ]
    .iter()
    .map(|&(s, n)| (s.to_string(), n))
    .collect()
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            holding_caps: default_holding_caps(),
            exclusive_groups: default_exclusive_groups(),
            bulk_ceilings: default_bulk_ceilings(),
        }
    }
}

/// The crafting-domain feasibility filter.
///
/// Built once from a [`PruneConfig`] and the domain's catalog. Items named by
/// the config but not declared by the domain are ignored.
#[derive(Debug, Clone)]
pub struct CraftingHeuristic {
    holding_caps: Vec<(ItemId, u32)>,
    groups: Vec<Vec<ItemId>>,
    group_of: Vec<Option<usize>>,
    bulk_ceiling: Vec<Option<u32>>,
}

impl CraftingHeuristic {
    pub fn new(config: &PruneConfig, items: &Items) -> Self {
        let resolve = |name: &str| match items.id(name) {
            Ok(id) => Some(id),
            Err(_) => {
                log::debug!("Prune config item '{}' is not declared, ignoring", name);
                None
            }
        };

        let holding_caps = config
            .holding_caps
            .iter()
            .filter_map(|(name, &cap)| resolve(name.as_str()).map(|id| (id, cap)))
            .collect();

        let mut groups = Vec::new();
        let mut group_of = vec![None; items.len()];
        for group in &config.exclusive_groups {
            let members: Vec<ItemId> = group.iter().filter_map(|n| resolve(n.as_str())).collect();
            if members.is_empty() {
                continue;
            }
            for &id in &members {
                match group_of[id.index()] {
                    Some(first) => log::warn!(
                        "Item '{}' is listed in more than one exclusive group, keeping group {}",
                        items.name(id),
                        first
                    ),
                    None => group_of[id.index()] = Some(groups.len()),
                }
            }
            groups.push(members);
        }

        let mut bulk_ceiling = vec![None; items.len()];
        for (name, &ceiling) in &config.bulk_ceilings {
            if let Some(id) = resolve(name.as_str()) {
                bulk_ceiling[id.index()] = Some(ceiling);
            }
        }

        Self {
            holding_caps,
            groups,
            group_of,
            bulk_ceiling,
        }
    }

    fn group_total(&self, group: usize, state: &State) -> u64 {
        self.groups[group]
            .iter()
            .map(|&id| u64::from(state.quantity(id)))
            .sum()
    }
}

impl Heuristic for CraftingHeuristic {
    fn estimate(&self, state: &State, recipe: &Recipe) -> f32 {
        if self
            .holding_caps
            .iter()
            .any(|&(item, cap)| state.quantity(item) > cap)
        {
            return f32::INFINITY;
        }

        for &(item, _) in recipe.produces() {
            if let Some(group) = self.group_of[item.index()] {
                if self.group_total(group, state) > 1 {
                    return f32::INFINITY;
                }
            }
            if let Some(ceiling) = self.bulk_ceiling[item.index()] {
                if state.quantity(item) > ceiling {
                    return f32::INFINITY;
                }
            }
        }

        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeDef;
    use std::sync::Arc;

    const ITEMS: [&str; 17] = [
        "bench",
        "cart",
        "coal",
        "cobble",
        "furnace",
        "ingot",
        "iron_axe",
        "iron_pickaxe",
        "ore",
        "plank",
        "rail",
        "stick",
        "stone_axe",
        "stone_pickaxe",
        "wood",
        "wooden_axe",
        "wooden_pickaxe",
    ];

    fn items() -> Arc<Items> {
        Items::new(ITEMS).unwrap()
    }

    fn producing(items: &Items, item: &str, amount: u32) -> Recipe {
        let def = RecipeDef::new(1.0).produces(item, amount);
        Recipe::compile(&format!("make {}", item), &def, items).unwrap()
    }

    fn holding(items: &Arc<Items>, quantities: &[(&str, u32)]) -> State {
        State::from_quantities(items, quantities.iter().copied()).unwrap()
    }

    #[test]
    fn test_default_ceiling_table() {
        let config = PruneConfig::default();
        let expected = [
            ("coal", 1),
            ("cobble", 8),
            ("ingot", 6),
            ("ore", 1),
            ("plank", 6),
            ("stick", 6),
            ("wood", 1),
        ];
        assert_eq!(config.bulk_ceilings.len(), expected.len());
        for (item, ceiling) in expected {
            assert_eq!(config.bulk_ceilings.get(item), Some(&ceiling));
        }
    }

    #[test]
    fn test_every_bulk_ceiling_both_ways() {
        let items = items();
        let config = PruneConfig::default();
        let heuristic = CraftingHeuristic::new(&config, &items);

        for (item, &ceiling) in &config.bulk_ceilings {
            let recipe = producing(&items, item, 1);

            let at = holding(&items, &[(item.as_str(), ceiling)]);
            assert_eq!(heuristic.estimate(&at, &recipe), 0.0, "{} at ceiling", item);

            let over = holding(&items, &[(item.as_str(), ceiling + 1)]);
            assert!(
                heuristic.estimate(&over, &recipe).is_infinite(),
                "{} over ceiling",
                item
            );
        }
    }

    #[test]
    fn test_bulk_ceiling_only_applies_to_produced_items() {
        let items = items();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);
        // plenty of wood left over, but the step made a stick
        let state = holding(&items, &[("wood", 5), ("stick", 1)]);
        let recipe = producing(&items, "stick", 1);
        assert_eq!(heuristic.estimate(&state, &recipe), 0.0);
    }

    #[test]
    fn test_single_bench_and_furnace() {
        let items = items();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);
        let any = producing(&items, "cart", 1);

        for item in ["bench", "furnace"] {
            assert_eq!(heuristic.estimate(&holding(&items, &[(item, 1)]), &any), 0.0);
            assert!(heuristic
                .estimate(&holding(&items, &[(item, 2)]), &any)
                .is_infinite());
        }
    }

    #[test]
    fn test_one_pickaxe_per_tier() {
        let items = items();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);
        let recipe = producing(&items, "stone_pickaxe", 1);

        let mixed = holding(
            &items,
            &[("wooden_pickaxe", 1), ("stone_pickaxe", 1), ("iron_pickaxe", 1)],
        );
        assert_eq!(heuristic.estimate(&mixed, &recipe), 0.0);

        let doubled = holding(&items, &[("stone_pickaxe", 2)]);
        assert!(heuristic.estimate(&doubled, &recipe).is_infinite());
    }

    #[test]
    fn test_single_axe_of_any_tier() {
        let items = items();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);

        let first = holding(&items, &[("wooden_axe", 1)]);
        assert_eq!(
            heuristic.estimate(&first, &producing(&items, "wooden_axe", 1)),
            0.0
        );

        let second = holding(&items, &[("wooden_axe", 1), ("stone_axe", 1)]);
        assert!(heuristic
            .estimate(&second, &producing(&items, "stone_axe", 1))
            .is_infinite());

        // holding an axe does not block unrelated recipes
        assert_eq!(
            heuristic.estimate(&second, &producing(&items, "cart", 1)),
            0.0
        );
    }

    #[test]
    fn test_axe_group_total_near_quantity_limit() {
        let items = items();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);
        let hoard = holding(&items, &[("wooden_axe", u32::MAX), ("stone_axe", 1)]);
        assert!(heuristic
            .estimate(&hoard, &producing(&items, "stone_axe", 1))
            .is_infinite());
    }

    #[test]
    fn test_item_in_two_groups_keeps_first() {
        let items = items();
        let config = PruneConfig {
            exclusive_groups: vec![
                vec!["wooden_axe".to_string(), "stone_axe".to_string()],
                vec!["stone_axe".to_string(), "iron_axe".to_string()],
            ],
            ..PruneConfig::default()
        };
        let heuristic = CraftingHeuristic::new(&config, &items);

        let state = holding(&items, &[("wooden_axe", 1), ("stone_axe", 1)]);
        assert!(heuristic
            .estimate(&state, &producing(&items, "stone_axe", 1))
            .is_infinite());
    }

    #[test]
    fn test_undeclared_config_items_are_ignored() {
        let items = Items::new(["wood", "plank"]).unwrap();
        let heuristic = CraftingHeuristic::new(&PruneConfig::default(), &items);
        let recipe = producing(&items, "plank", 4);
        let state = holding(&items, &[("plank", 6)]);
        assert_eq!(heuristic.estimate(&state, &recipe), 0.0);
        let state = holding(&items, &[("plank", 7)]);
        assert!(heuristic.estimate(&state, &recipe).is_infinite());
    }

    #[test]
    fn test_zero_heuristic_keeps_everything() {
        let items = items();
        let state = holding(&items, &[("bench", 5), ("wood", 50)]);
        let recipe = producing(&items, "wood", 1);
        assert_eq!(ZeroHeuristic.estimate(&state, &recipe), 0.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PruneConfig =
            serde_json::from_str(r#"{ "bulk_ceilings": { "wood": 3 } }"#).unwrap();
        assert_eq!(config.bulk_ceilings.len(), 1);
        assert_eq!(config.holding_caps, default_holding_caps());
        assert_eq!(config.exclusive_groups, default_exclusive_groups());
    }
}
