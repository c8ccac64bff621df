use std::fmt;

use indexmap::IndexMap;

use crate::state::{ItemId, Items, State};
use crate::Result;

/// Minimum quantities a state must hold to count as finished.
///
/// Items not listed in the goal are unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    targets: Vec<(ItemId, u32)>,
    names: Vec<String>,
}

impl Goal {
    /// Compiles an item to minimum-quantity mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownItem`](crate::CraftError::UnknownItem) if
    /// the goal names an item outside `items`.
    pub fn compile(targets: &IndexMap<String, u32>, items: &Items) -> Result<Self> {
        let resolved = targets
            .iter()
            .map(|(name, &amount)| Ok((items.id(name)?, amount)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            targets: resolved,
            names: targets.keys().cloned().collect(),
        })
    }

    pub fn is_satisfied(&self, state: &State) -> bool {
        self.targets
            .iter()
            .all(|&(item, amount)| state.quantity(item) >= amount)
    }

    pub fn targets(&self) -> &[(ItemId, u32)] {
        &self.targets
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, (_, amount))) in self.names.iter().zip(&self.targets).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, amount)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CraftError;

    #[test]
    fn test_goal_minimums() {
        let items = Items::new(["wood", "plank", "stick"]).unwrap();
        let mut targets = IndexMap::new();
        targets.insert("plank".to_string(), 4);
        targets.insert("stick".to_string(), 1);
        let goal = Goal::compile(&targets, &items).unwrap();

        let short = State::from_quantities(&items, [("plank", 4)]).unwrap();
        assert!(!goal.is_satisfied(&short));

        let exact = State::from_quantities(&items, [("plank", 4), ("stick", 1)]).unwrap();
        assert!(goal.is_satisfied(&exact));

        let extra = State::from_quantities(&items, [("plank", 9), ("stick", 2), ("wood", 5)]).unwrap();
        assert!(goal.is_satisfied(&extra));
        assert_eq!(goal.to_string(), "{plank: 4, stick: 1}");
    }

    #[test]
    fn test_empty_goal_is_always_satisfied() {
        let items = Items::new(["wood"]).unwrap();
        let goal = Goal::compile(&IndexMap::new(), &items).unwrap();
        assert!(goal.is_satisfied(&State::new(&items)));
    }

    #[test]
    fn test_goal_unknown_item() {
        let items = Items::new(["wood"]).unwrap();
        let mut targets = IndexMap::new();
        targets.insert("iron_pickaxe".to_string(), 1);
        let result = Goal::compile(&targets, &items);
        assert!(matches!(result, Err(CraftError::UnknownItem(name)) if name == "iron_pickaxe"));
    }
}
