use craft_planner::{Domain, Planner, PlannerConfig, Result, SearchOutcome};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    // Defaults to the crafting domain shipped with the tests
    let path = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/crafting.json")
    });
    let domain = Domain::from_path(&path)?;

    let config = PlannerConfig::default().with_time_budget(Duration::from_secs(30));
    let planner = Planner::new(&domain, config)?;

    println!("Initial: {}", planner.initial_state());
    println!("Goal: {}", planner.goal());

    match planner.plan() {
        SearchOutcome::Found(plan) => println!("{}", plan),
        SearchOutcome::Failed(failure) => println!("No plan: {}", failure),
    }

    Ok(())
}
