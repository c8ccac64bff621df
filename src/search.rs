//! # Time-bounded best-first search
//!
//! The search explores the implicit graph whose nodes are [`State`]s and
//! whose edges are recipe applications, always expanding the frontier entry
//! with the lowest `accumulated cost + heuristic`. Ties are broken by the
//! state's own total order, so a given domain always yields the same plan.
//!
//! The wall-clock deadline is polled once per loop iteration. When it fires,
//! the pass stops where it is and reports a [`SearchFailure`]; there is no
//! restart, since rerunning a deterministic search changes nothing.
//!
//! ```
//! use std::time::Duration;
//! use craft_planner::{search, Items, Recipe, RecipeBook, RecipeDef, State, ZeroHeuristic};
//!
//! let items = Items::new(["wood", "plank"]).unwrap();
//! let def = RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4);
//! let book = RecipeBook::from_recipes(vec![
//!     Recipe::compile("plank from wood", &def, &items).unwrap(),
//! ])
//! .unwrap();
//!
//! let start = State::from_quantities(&items, [("wood", 1)]).unwrap();
//! let outcome = search(
//!     &book,
//!     &start,
//!     |s: &State| s.get("plank").unwrap() >= 4,
//!     Duration::from_secs(1),
//!     &ZeroHeuristic,
//! );
//! let plan = outcome.plan().unwrap();
//! assert_eq!(plan.recipes().collect::<Vec<_>>(), vec!["plank from wood"]);
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::heuristic::Heuristic;
use crate::plan::{FailureReason, Plan, PlanStep, SearchFailure, SearchOutcome, SearchStats, StepAction};
use crate::recipe::{Recipe, RecipeBook, Successor};
use crate::state::State;

/// The implicit graph explored by the search.
pub trait Graph {
    /// Every state reachable from `state` by one recipe, with the recipe's
    /// cost. Must not depend on anything but `state`.
    fn successors(&self, state: &State) -> Vec<Successor<'_>>;
}

impl Graph for RecipeBook {
    fn successors(&self, state: &State) -> Vec<Successor<'_>> {
        RecipeBook::successors(self, state)
    }
}

/// A frontier entry, ordered by priority then by state.
#[derive(Debug, Clone)]
struct FrontierEntry {
    priority: f32,
    cost: f32,
    state: State,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.state.cmp(&other.state))
    }
}

/// Bookkeeping for one search pass.
struct SearchContext<'g> {
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    best_cost: HashMap<State, f32>,
    came_from: HashMap<State, (State, &'g Recipe)>,
    expanded: HashSet<State>,
    stats: SearchStats,
}

impl<'g> SearchContext<'g> {
    fn new(initial: &State) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(FrontierEntry {
            priority: 0.0,
            cost: 0.0,
            state: initial.clone(),
        }));

        let mut best_cost = HashMap::new();
        best_cost.insert(initial.clone(), 0.0);

        Self {
            frontier,
            best_cost,
            came_from: HashMap::new(),
            expanded: HashSet::new(),
            stats: SearchStats::default(),
        }
    }

    /// Pops the next entry worth expanding, skipping stale ones.
    fn next_entry(&mut self) -> Option<FrontierEntry> {
        while let Some(Reverse(entry)) = self.frontier.pop() {
            let best = self
                .best_cost
                .get(&entry.state)
                .copied()
                .unwrap_or(f32::INFINITY);
            if entry.cost > best || self.expanded.contains(&entry.state) {
                continue;
            }
            return Some(entry);
        }
        None
    }

    fn expand<G, H>(&mut self, graph: &'g G, entry: &FrontierEntry, heuristic: &H)
    where
        G: Graph + ?Sized,
        H: Heuristic + ?Sized,
    {
        self.expanded.insert(entry.state.clone());

        for successor in graph.successors(&entry.state) {
            self.stats.generated += 1;

            // Finalized costs never move.
            if self.expanded.contains(&successor.state) {
                continue;
            }

            let cost = entry.cost + successor.cost;
            let improves = self
                .best_cost
                .get(&successor.state)
                .map_or(true, |&best| cost < best);
            if !improves {
                continue;
            }

            let estimate = heuristic.estimate(&successor.state, successor.recipe);
            if estimate == f32::INFINITY {
                self.stats.pruned += 1;
                continue;
            }

            debug_assert!(
                !self.expanded.contains(&successor.state),
                "lowering the cost of an expanded state"
            );
            self.best_cost.insert(successor.state.clone(), cost);
            self.came_from.insert(
                successor.state.clone(),
                (entry.state.clone(), successor.recipe),
            );
            self.frontier.push(Reverse(FrontierEntry {
                priority: cost + estimate,
                cost,
                state: successor.state,
            }));
        }
    }

    /// Walks predecessor links back from `goal` to the initial state.
    fn reconstruct_path(&self, goal: &State) -> Vec<PlanStep> {
        let mut steps = vec![PlanStep {
            state: goal.clone(),
            action: StepAction::Done,
        }];

        let mut current = goal;
        while let Some((previous, recipe)) = self.came_from.get(current) {
            steps.push(PlanStep {
                state: previous.clone(),
                action: StepAction::Recipe(recipe.name().to_string()),
            });
            current = previous;
        }

        steps.reverse();
        steps
    }
}

/// Best-first search with a wall-clock budget.
#[derive(Debug, Clone, Copy)]
pub struct BestFirstSearch {
    time_budget: Duration,
}

impl BestFirstSearch {
    pub fn new(time_budget: Duration) -> Self {
        Self { time_budget }
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Searches for the cheapest path from `initial` to a state accepted by
    /// `is_goal`.
    ///
    /// Candidates the heuristic scores as infinite are dropped before any
    /// bookkeeping. The returned plan is optimal among paths that avoid
    /// pruned candidates when the heuristic only ever answers zero or
    /// infinity.
    pub fn search<'g, G, H, F>(
        &self,
        graph: &'g G,
        initial: &State,
        is_goal: F,
        heuristic: &H,
    ) -> SearchOutcome
    where
        G: Graph + ?Sized,
        H: Heuristic + ?Sized,
        F: Fn(&State) -> bool,
    {
        let start_time = Instant::now();
        let mut context = SearchContext::new(initial);
        let mut last_state = initial.clone();

        log::info!(
            "Starting search from {} with a budget of {:.3}s",
            initial,
            self.time_budget.as_secs_f64()
        );

        let reason = loop {
            if start_time.elapsed() >= self.time_budget {
                break FailureReason::TimeExpired;
            }

            let entry = match context.next_entry() {
                Some(entry) => entry,
                None => break FailureReason::Exhausted,
            };
            context.stats.visited += 1;

            if is_goal(&entry.state) {
                let steps = context.reconstruct_path(&entry.state);
                let mut stats = context.stats;
                stats.elapsed = start_time.elapsed();
                let plan = Plan::new(steps, entry.cost, stats);
                log::info!(
                    "Found a plan: states visited {}, length {}, cost {}, {:.3}s",
                    stats.visited,
                    plan.len(),
                    plan.total_cost(),
                    stats.elapsed.as_secs_f64()
                );
                return SearchOutcome::Found(plan);
            }

            context.expand(graph, &entry, heuristic);
            last_state = entry.state;
        };

        let mut stats = context.stats;
        stats.elapsed = start_time.elapsed();
        log::warn!(
            "Failed to find a plan from {} ({}): states visited {}, {:.3}s",
            initial,
            reason,
            stats.visited,
            stats.elapsed.as_secs_f64()
        );
        SearchOutcome::Failed(SearchFailure {
            reason,
            last_state,
            stats,
        })
    }
}

/// Runs a single [`BestFirstSearch`] pass.
///
/// `initial` and every state the graph yields must share the item catalog
/// the graph's recipes were compiled against. [`Planner::plan_from`] checks
/// this; here it is the caller's job.
///
/// [`Planner::plan_from`]: crate::Planner::plan_from
pub fn search<G, H, F>(
    graph: &G,
    initial: &State,
    is_goal: F,
    time_budget: Duration,
    heuristic: &H,
) -> SearchOutcome
where
    G: Graph + ?Sized,
    H: Heuristic + ?Sized,
    F: Fn(&State) -> bool,
{
    BestFirstSearch::new(time_budget).search(graph, initial, is_goal, heuristic)
}
