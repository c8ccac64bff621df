//! # Crafting domain documents
//!
//! A domain document declares the items that exist, the starting inventory,
//! the goal and the recipes:
//!
//! ```json
//! {
//!   "Items": ["wood", "plank"],
//!   "Initial": { "wood": 1 },
//!   "Goal": { "plank": 4 },
//!   "Recipes": {
//!     "plank from wood": { "Consumes": { "wood": 1 }, "Produces": { "plank": 4 }, "Time": 1 }
//!   }
//! }
//! ```
//!
//! [`Domain`] mirrors the document. [`Domain::compile`] validates it once and
//! turns it into the typed pieces the search works with.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::goal::Goal;
use crate::recipe::{RecipeBook, RecipeDef};
use crate::state::{Items, State};
use crate::{CraftError, Result};

/// A crafting domain as declared in a document.
///
/// Recipe order is kept as declared; it fixes the order in which successors
/// are generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(rename = "Items")]
    pub items: Vec<String>,
    #[serde(rename = "Initial", default)]
    pub initial: IndexMap<String, u32>,
    #[serde(rename = "Goal", default)]
    pub goal: IndexMap<String, u32>,
    #[serde(rename = "Recipes", default)]
    pub recipes: IndexMap<String, RecipeDef>,
}

/// A validated domain, ready to search.
#[derive(Debug, Clone)]
pub struct CompiledDomain {
    pub items: Arc<Items>,
    pub initial: State,
    pub goal: Goal,
    pub recipes: RecipeBook,
}

impl Domain {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validates the domain and compiles recipes, goal and initial state.
    ///
    /// # Errors
    ///
    /// * [`CraftError::InvalidDomain`] if no items are declared, or an item
    ///   is declared twice.
    /// * [`CraftError::UnknownItem`] if the initial inventory, the goal or a
    ///   recipe references an undeclared item.
    /// * [`CraftError::MalformedRecipe`] for recipes with a bad cost or zero
    ///   amounts.
    pub fn compile(&self) -> Result<CompiledDomain> {
        if self.items.is_empty() {
            return Err(CraftError::InvalidDomain("no items declared".to_string()));
        }
        let items = Items::new(self.items.iter().cloned())?;
        let initial = State::from_quantities(
            &items,
            self.initial.iter().map(|(name, &amount)| (name, amount)),
        )?;
        let goal = Goal::compile(&self.goal, &items)?;
        let recipes = RecipeBook::compile(&self.recipes, &items)?;

        log::info!(
            "Compiled domain: {} items, {} recipes, goal {}",
            items.len(),
            recipes.len(),
            goal
        );

        Ok(CompiledDomain {
            items,
            initial,
            goal,
            recipes,
        })
    }
}
