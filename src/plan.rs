//! Search results: plans, failures and the diagnostics attached to both.

use std::fmt;
use std::time::Duration;

use crate::state::State;

/// What was done from a step's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// The named recipe was applied, producing the next step's state.
    Recipe(String),
    /// The step's state satisfies the goal.
    Done,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Recipe(name) => write!(f, "{}", name),
            StepAction::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub state: State,
    pub action: StepAction,
}

/// Counters collected during one search pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// States popped from the frontier and examined (stale entries excluded).
    pub visited: usize,
    /// Successors produced by the graph.
    pub generated: usize,
    /// Successors discarded by the heuristic.
    pub pruned: usize,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "states visited: {}, generated: {}, pruned: {}, elapsed: {:.3}s",
            self.visited,
            self.generated,
            self.pruned,
            self.elapsed.as_secs_f64()
        )
    }
}

/// A path from the initial state to a goal state.
///
/// Every step but the last names the recipe applied to its state; the last
/// step holds the goal state and [`StepAction::Done`].
#[derive(Debug, Clone)]
pub struct Plan {
    steps: Vec<PlanStep>,
    total_cost: f32,
    stats: SearchStats,
}

impl Plan {
    pub(crate) fn new(steps: Vec<PlanStep>, total_cost: f32, stats: SearchStats) -> Self {
        debug_assert!(matches!(
            steps.last(),
            Some(PlanStep {
                action: StepAction::Done,
                ..
            })
        ));
        Self {
            steps,
            total_cost,
            stats,
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of recipes applied.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recipe names in application order.
    pub fn recipes(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match &step.action {
            StepAction::Recipe(name) => Some(name.as_str()),
            StepAction::Done => None,
        })
    }

    pub fn initial_state(&self) -> &State {
        &self.steps[0].state
    }

    pub fn final_state(&self) -> &State {
        &self.steps[self.steps.len() - 1].state
    }

    pub fn total_cost(&self) -> f32 {
        self.total_cost
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "\t{}", step.state)?;
            writeln!(f, "{}", step.action)?;
        }
        write!(
            f,
            "length: {}, cost: {}, {}",
            self.len(),
            self.total_cost,
            self.stats
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The deadline passed before a goal state was reached.
    TimeExpired,
    /// Every reachable (unpruned) state was examined without reaching the goal.
    Exhausted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::TimeExpired => write!(f, "time budget expired"),
            FailureReason::Exhausted => write!(f, "search space exhausted"),
        }
    }
}

/// Why and where a search stopped without a plan.
#[derive(Debug, Clone)]
pub struct SearchFailure {
    pub reason: FailureReason,
    /// The last state expanded before the search stopped.
    pub last_state: State,
    pub stats: SearchStats,
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to find a plan ({}) after {:.3}s, last state {}",
            self.reason,
            self.stats.elapsed.as_secs_f64(),
            self.last_state
        )
    }
}

/// Result of a search pass. Not finding a plan is an expected outcome, so it
/// is reported here rather than as an error.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Plan),
    Failed(SearchFailure),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            SearchOutcome::Failed(_) => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            SearchOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&SearchFailure> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(plan) => plan.stats(),
            SearchOutcome::Failed(failure) => &failure.stats,
        }
    }
}
