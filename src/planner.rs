//! # Planner
//!
//! The planner ties a compiled domain, a heuristic and the time-bounded search
//! together. Everything is compiled and validated when the planner is built,
//! so [`Planner::plan`] can only fail by not finding a plan, which it reports
//! as a [`SearchOutcome`] rather than an error.
//!
//! ```
//! use craft_planner::{Domain, Planner, PlannerConfig};
//!
//! let domain = Domain::from_json_str(r#"{
//!     "Items": ["wood", "plank", "bench"],
//!     "Initial": {},
//!     "Goal": { "bench": 1 },
//!     "Recipes": {
//!         "punch for wood": { "Produces": { "wood": 1 }, "Time": 4 },
//!         "craft plank": { "Consumes": { "wood": 1 }, "Produces": { "plank": 4 }, "Time": 1 },
//!         "craft bench": { "Consumes": { "plank": 4 }, "Produces": { "bench": 1 }, "Time": 1 }
//!     }
//! }"#).unwrap();
//!
//! let planner = Planner::new(&domain, PlannerConfig::default()).unwrap();
//! let outcome = planner.plan();
//! let plan = outcome.plan().unwrap();
//!
//! assert_eq!(
//!     plan.recipes().collect::<Vec<_>>(),
//!     vec!["punch for wood", "craft plank", "craft bench"]
//! );
//! assert_eq!(plan.total_cost(), 6.0);
//! ```

use std::sync::Arc;

use crate::config::{HeuristicKind, PlannerConfig};
use crate::domain::{CompiledDomain, Domain};
use crate::goal::Goal;
use crate::heuristic::{CraftingHeuristic, Heuristic, ZeroHeuristic};
use crate::plan::SearchOutcome;
use crate::recipe::RecipeBook;
use crate::search::BestFirstSearch;
use crate::state::{Items, State};
use crate::{CraftError, Result};

/// Plans over one crafting domain.
pub struct Planner {
    domain: CompiledDomain,
    heuristic: Box<dyn Heuristic>,
    search: BestFirstSearch,
}

impl Planner {
    /// Compiles `domain` and prepares the configured heuristic.
    ///
    /// # Errors
    ///
    /// Any compile error of [`Domain::compile`], or
    /// [`CraftError::InvalidConfig`] for an unusable configuration.
    pub fn new(domain: &Domain, config: PlannerConfig) -> Result<Self> {
        Self::from_compiled(domain.compile()?, config)
    }

    pub fn from_compiled(domain: CompiledDomain, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let heuristic: Box<dyn Heuristic> = match config.heuristic {
            HeuristicKind::Crafting => {
                Box::new(CraftingHeuristic::new(&config.prune, &domain.items))
            }
            HeuristicKind::Zero => Box::new(ZeroHeuristic),
        };
        Ok(Self {
            domain,
            heuristic,
            search: BestFirstSearch::new(config.time_budget()),
        })
    }

    /// Searches from the domain's initial inventory.
    pub fn plan(&self) -> SearchOutcome {
        self.run(&self.domain.initial)
    }

    /// Searches from another inventory of the same domain.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidDomain`] if `state` was built over a
    /// different item catalog.
    pub fn plan_from(&self, state: &State) -> Result<SearchOutcome> {
        if state.items() != &self.domain.items {
            return Err(CraftError::InvalidDomain(
                "state was built for a different item catalog".to_string(),
            ));
        }
        Ok(self.run(state))
    }

    fn run(&self, state: &State) -> SearchOutcome {
        let goal = &self.domain.goal;
        self.search.search(
            &self.domain.recipes,
            state,
            |s: &State| goal.is_satisfied(s),
            self.heuristic.as_ref(),
        )
    }

    pub fn items(&self) -> &Arc<Items> {
        &self.domain.items
    }

    pub fn initial_state(&self) -> &State {
        &self.domain.initial
    }

    pub fn goal(&self) -> &Goal {
        &self.domain.goal
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.domain.recipes
    }

    pub fn search(&self) -> &BestFirstSearch {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::FailureReason;
    use crate::recipe::RecipeDef;
    use std::time::Duration;

    fn domain() -> Domain {
        let mut domain = Domain {
            items: ["wood", "plank", "stick", "bench"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Domain::default()
        };
        domain.goal.insert("stick".to_string(), 4);
        domain
            .recipes
            .insert("punch for wood".to_string(), RecipeDef::new(4.0).produces("wood", 1));
        domain.recipes.insert(
            "craft plank".to_string(),
            RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4),
        );
        domain.recipes.insert(
            "craft stick".to_string(),
            RecipeDef::new(1.0).consumes("plank", 2).produces("stick", 4),
        );
        domain
    }

    fn quick() -> PlannerConfig {
        PlannerConfig::default().with_time_budget(Duration::from_secs(5))
    }

    #[test]
    fn test_simple_plan() {
        let planner = Planner::new(&domain(), quick()).unwrap();
        let plan = planner.plan().into_plan().unwrap();
        assert_eq!(
            plan.recipes().collect::<Vec<_>>(),
            vec!["punch for wood", "craft plank", "craft stick"]
        );
        assert_eq!(plan.total_cost(), 6.0);
        assert_eq!(plan.final_state().get("stick").unwrap(), 4);
    }

    #[test]
    fn test_plan_from_other_state() {
        let planner = Planner::new(&domain(), quick()).unwrap();
        let start = State::from_quantities(planner.items(), [("plank", 2)]).unwrap();
        let plan = planner.plan_from(&start).unwrap().into_plan().unwrap();
        assert_eq!(plan.recipes().collect::<Vec<_>>(), vec!["craft stick"]);
    }

    #[test]
    fn test_plan_from_foreign_state() {
        let planner = Planner::new(&domain(), quick()).unwrap();
        let other = Items::new(["ore"]).unwrap();
        let result = planner.plan_from(&State::new(&other));
        assert!(matches!(result, Err(CraftError::InvalidDomain(_))));
    }

    #[test]
    fn test_no_plan_found() {
        let mut domain = domain();
        domain.goal.insert("bench".to_string(), 1);
        let planner = Planner::new(&domain, quick()).unwrap();
        let outcome = planner.plan();
        // the crafting heuristic caps wood and planks, so the space is finite
        assert_eq!(outcome.failure().unwrap().reason, FailureReason::Exhausted);
    }

    #[test]
    fn test_invalid_config() {
        let config = PlannerConfig {
            time_budget_secs: 0.0,
            ..PlannerConfig::default()
        };
        let result = Planner::new(&domain(), config);
        assert!(matches!(result, Err(CraftError::InvalidConfig(_))));
    }

    #[test]
    fn test_different_heuristics_agree_on_cost() {
        let crafting = Planner::new(&domain(), quick()).unwrap();
        let zero = Planner::new(&domain(), quick().with_heuristic(HeuristicKind::Zero)).unwrap();

        let a = crafting.plan().into_plan().unwrap();
        let b = zero.plan().into_plan().unwrap();
        assert_eq!(a.total_cost(), b.total_cost());
        assert!(a.stats().visited <= b.stats().visited);
    }
}
