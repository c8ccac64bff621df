//! A planner for crafting domains.
//!
//! Given the items of a domain, a starting inventory, a goal and a set of
//! recipes, the planner finds the cheapest sequence of recipes that turns the
//! inventory into one meeting the goal, within a wall-clock budget.
//!
//! See [`Planner`] for the usual entry point and [`search()`] for driving the
//! search over a custom [`Graph`] or [`Heuristic`].

mod config;
mod domain;
mod error;
mod goal;
mod heuristic;
mod plan;
mod planner;
mod recipe;
mod search;
mod state;
mod visualizer;

pub use config::{HeuristicKind, PlannerConfig};
pub use domain::{CompiledDomain, Domain};
pub use error::{CraftError, Result};
pub use goal::Goal;
pub use heuristic::{CraftingHeuristic, Heuristic, PruneConfig, ZeroHeuristic};
pub use plan::{FailureReason, Plan, PlanStep, SearchFailure, SearchOutcome, SearchStats, StepAction};
pub use planner::Planner;
pub use recipe::{Recipe, RecipeBook, RecipeDef, Successor};
pub use search::{search, BestFirstSearch, Graph};
pub use state::{ItemId, Items, State};
pub use visualizer::PlanVisualizer;
