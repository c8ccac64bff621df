use crate::plan::{Plan, StepAction};
use crate::state::State;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Renders plans as Graphviz DOT graphs
#[derive(Debug, Default)]
pub struct PlanVisualizer;

impl PlanVisualizer {
    /// Create a new plan visualizer
    pub fn new() -> Self {
        Self
    }

    /// Write a DOT graph of `plan`: one node per inventory, one edge per recipe
    pub fn write_dot<W: Write>(&self, plan: &Plan, mut out: W) -> Result<()> {
        writeln!(out, "digraph Plan {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(out, "    node [shape=box, style=filled, fillcolor=lightblue];")?;
        writeln!(out, "    edge [fontsize=10];")?;

        let last = plan.steps().len() - 1;
        for (i, step) in plan.steps().iter().enumerate() {
            let fill = if i == 0 {
                ", fillcolor=lightgreen"
            } else if i == last {
                ", fillcolor=lightpink"
            } else {
                ""
            };
            writeln!(
                out,
                "    step_{} [label=\"{}\"{}];",
                i,
                Self::state_label(&step.state),
                fill
            )?;
        }

        for (i, step) in plan.steps().iter().enumerate() {
            if let StepAction::Recipe(name) = &step.action {
                writeln!(
                    out,
                    "    step_{} -> step_{} [label=\"{}\"];",
                    i,
                    i + 1,
                    Self::escape(name)
                )?;
            }
        }

        writeln!(
            out,
            "    label=\"cost {} in {} steps\";",
            plan.total_cost(),
            plan.len()
        )?;
        writeln!(out, "}}")?;
        Ok(())
    }

    /// Write the DOT graph of `plan` to a file
    pub fn save_dot(&self, plan: &Plan, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_dot(plan, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Non-empty items, one per line
    fn state_label(state: &State) -> String {
        let lines: Vec<String> = state
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(name, amount)| format!("{}: {}", Self::escape(name), amount))
            .collect();
        if lines.is_empty() {
            "(empty)".to_string()
        } else {
            lines.join("\\n")
        }
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, Planner, PlannerConfig};

    fn plan() -> Plan {
        let domain = Domain::from_json_str(
            r#"{
                "Items": ["wood", "plank"],
                "Goal": { "plank": 4 },
                "Recipes": {
                    "punch for wood": { "Produces": { "wood": 1 }, "Time": 4 },
                    "craft \"plank\"": { "Consumes": { "wood": 1 }, "Produces": { "plank": 4 }, "Time": 1 }
                }
            }"#,
        )
        .unwrap();
        Planner::new(&domain, PlannerConfig::default())
            .unwrap()
            .plan()
            .into_plan()
            .unwrap()
    }

    #[test]
    fn test_write_dot() {
        let mut out = Vec::new();
        PlanVisualizer::new().write_dot(&plan(), &mut out).unwrap();
        let content = String::from_utf8(out).unwrap();

        assert!(content.starts_with("digraph Plan {"));
        assert!(content.contains("step_0 [label=\"(empty)\", fillcolor=lightgreen];"));
        assert!(content.contains("step_1 [label=\"wood: 1\"];"));
        assert!(content.contains("step_2 [label=\"plank: 4\", fillcolor=lightpink];"));
        assert!(content.contains("step_0 -> step_1 [label=\"punch for wood\"];"));
        assert!(content.contains("step_1 -> step_2 [label=\"craft \\\"plank\\\"\"];"));
        assert!(content.contains("label=\"cost 5 in 2 steps\";"));
        assert!(content.trim_end().ends_with('}'));
    }

    #[test]
    fn test_save_dot() {
        let path = std::env::temp_dir().join(format!("craft_plan_{}.dot", std::process::id()));
        PlanVisualizer::new().save_dot(&plan(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("digraph Plan"));
        assert!(content.contains("punch for wood"));

        std::fs::remove_file(&path).unwrap();
    }
}
