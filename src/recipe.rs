//! # Recipes
//!
//! A recipe is the only kind of action a crafter can take. It is declared as a
//! [`RecipeDef`], the schema of the domain document, and compiled once into a
//! [`Recipe`] whose item references are resolved against the domain's
//! [`Items`] catalog. After compilation a recipe can test whether it applies to
//! a state ([`Recipe::check`]) and produce the state that results from
//! applying it ([`Recipe::apply`]) without any further lookups or validation.
//!
//! ## Semantics
//!
//! * **Consumes**: each entry must be held in at least the given amount, and
//!   is removed by the recipe.
//! * **Requires**: each entry must be held (quantity above zero); nothing is
//!   removed.
//! * **Produces**: each entry is added to the inventory.
//!
//! An item that is both produced and consumed ends up at
//! `held + produced - consumed`. A recipe whose result would not fit in a
//! `u32` does not apply.
//!
//! ```
//! use craft_planner::{Items, Recipe, RecipeDef, State};
//!
//! let items = Items::new(["wood", "plank", "bench"]).unwrap();
//! let def = RecipeDef::new(1.0)
//!     .consumes("wood", 1)
//!     .produces("plank", 4);
//! let recipe = Recipe::compile("plank from wood", &def, &items).unwrap();
//!
//! let state = State::from_quantities(&items, [("wood", 1)]).unwrap();
//! assert!(recipe.check(&state));
//!
//! let next = recipe.apply(&state);
//! assert_eq!(next.get("plank").unwrap(), 4);
//! assert_eq!(next.get("wood").unwrap(), 0);
//! assert!(!recipe.check(&next));
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::{ItemId, Items, State};
use crate::{CraftError, Result};

/// A recipe as declared in a domain document.
///
/// Absent sections deserialize as empty maps, so a compiled recipe never has
/// to distinguish "missing" from "empty". `Requires` values may be any JSON
/// value and are ignored: the presence of a key is the requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDef {
    #[serde(rename = "Consumes", default, skip_serializing_if = "IndexMap::is_empty")]
    pub consumes: IndexMap<String, u32>,
    #[serde(rename = "Requires", default, skip_serializing_if = "IndexMap::is_empty")]
    pub requires: IndexMap<String, serde_json::Value>,
    #[serde(rename = "Produces", default, skip_serializing_if = "IndexMap::is_empty")]
    pub produces: IndexMap<String, u32>,
    /// Cost of applying the recipe, declared as `Time` in crafting documents.
    #[serde(rename = "Time", default)]
    pub cost: Option<f32>,
}

impl RecipeDef {
    pub fn new(cost: f32) -> Self {
        Self {
            cost: Some(cost),
            ..Self::default()
        }
    }

    pub fn consumes(mut self, item: impl Into<String>, amount: u32) -> Self {
        self.consumes.insert(item.into(), amount);
        self
    }

    pub fn requires(mut self, item: impl Into<String>) -> Self {
        self.requires.insert(item.into(), serde_json::Value::Bool(true));
        self
    }

    pub fn produces(mut self, item: impl Into<String>, amount: u32) -> Self {
        self.produces.insert(item.into(), amount);
        self
    }
}

/// A recipe compiled against an item catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: String,
    consumes: Vec<(ItemId, u32)>,
    requires: Vec<ItemId>,
    produces: Vec<(ItemId, u32)>,
    cost: f32,
}

impl Recipe {
    /// Compiles a declared recipe.
    ///
    /// # Errors
    ///
    /// * [`CraftError::UnknownItem`] if any section names an item outside
    ///   `items`.
    /// * [`CraftError::MalformedRecipe`] if the cost is missing, not finite
    ///   or not positive, or if a Consumes/Produces amount is zero.
    pub fn compile(name: &str, def: &RecipeDef, items: &Items) -> Result<Self> {
        let cost = match def.cost {
            None => return Err(CraftError::malformed(name, "missing cost")),
            Some(cost) if !cost.is_finite() || cost <= 0.0 => {
                return Err(CraftError::malformed(
                    name,
                    format!("cost must be positive, got {}", cost),
                ))
            }
            Some(cost) => cost,
        };

        let consumes = Self::resolve_amounts(name, "Consumes", &def.consumes, items)?;
        let produces = Self::resolve_amounts(name, "Produces", &def.produces, items)?;
        let requires = def
            .requires
            .keys()
            .map(|item| items.id(item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            consumes,
            requires,
            produces,
            cost,
        })
    }

    fn resolve_amounts(
        name: &str,
        section: &str,
        entries: &IndexMap<String, u32>,
        items: &Items,
    ) -> Result<Vec<(ItemId, u32)>> {
        entries
            .iter()
            .map(|(item, &amount)| {
                let id = items.id(item)?;
                if amount == 0 {
                    return Err(CraftError::malformed(
                        name,
                        format!("{} entry '{}' has a zero amount", section, item),
                    ));
                }
                Ok((id, amount))
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Items added by this recipe, in declaration order.
    pub fn produces(&self) -> &[(ItemId, u32)] {
        &self.produces
    }

    pub fn consumes(&self) -> &[(ItemId, u32)] {
        &self.consumes
    }

    pub fn requires(&self) -> &[ItemId] {
        &self.requires
    }

    pub fn produces_item(&self, id: ItemId) -> bool {
        self.produces.iter().any(|&(item, _)| item == id)
    }

    fn consumed(&self, id: ItemId) -> u32 {
        self.consumes
            .iter()
            .find(|&&(item, _)| item == id)
            .map_or(0, |&(_, amount)| amount)
    }

    /// Whether the recipe can be applied in `state`.
    ///
    /// `state` must come from the catalog the recipe was compiled against;
    /// a state over another catalog may index out of bounds.
    pub fn check(&self, state: &State) -> bool {
        self.consumes
            .iter()
            .all(|&(item, amount)| state.quantity(item) >= amount)
            && self.requires.iter().all(|&item| state.quantity(item) > 0)
            && self.produces.iter().all(|&(item, amount)| {
                (state.quantity(item) - self.consumed(item))
                    .checked_add(amount)
                    .is_some()
            })
    }

    /// Returns the state that results from applying the recipe to `state`.
    ///
    /// `state` itself is left untouched. Callers must only apply a recipe
    /// whose [`check`](Self::check) passed.
    pub fn apply(&self, state: &State) -> State {
        let mut next = state.clone();
        for &(item, amount) in &self.consumes {
            next.remove(item, amount);
        }
        for &(item, amount) in &self.produces {
            next.add(item, amount);
        }
        next
    }
}

/// A state reachable from another by applying a single recipe.
#[derive(Debug, Clone)]
pub struct Successor<'a> {
    pub recipe: &'a Recipe,
    pub state: State,
    pub cost: f32,
}

/// Every recipe of a domain, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Compiles every declared recipe, keeping declaration order.
    pub fn compile(defs: &IndexMap<String, RecipeDef>, items: &Items) -> Result<Self> {
        let recipes = defs
            .iter()
            .map(|(name, def)| Recipe::compile(name, def, items))
            .collect::<Result<Vec<_>>>()?;
        Self::from_recipes(recipes)
    }

    /// Wraps already compiled recipes.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::MalformedRecipe`] if two recipes share a name.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.name()) {
                return Err(CraftError::malformed(recipe.name(), "duplicate recipe name"));
            }
        }
        Ok(Self { recipes })
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Applies every recipe whose preconditions hold in `state`.
    pub fn successors(&self, state: &State) -> Vec<Successor<'_>> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.check(state))
            .map(|recipe| Successor {
                recipe,
                state: recipe.apply(state),
                cost: recipe.cost(),
            })
            .collect()
    }
}
