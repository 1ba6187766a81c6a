//! Goal dispatch.
//!
//! Maps the `[goals.*]` tables of kiln.toml to the generators that
//! implement them.

use kiln_codegen::Goal;
use kiln_codegen_java::{ConfigurerGoal, UriFactoryGoal};
use kiln_codegen_resources::{BeanGoal, ComponentGoal, ConsoleGoal, TransformerGoal};
use kiln_manifest::{GoalConfig, GoalsConfig};

/// Every enabled goal, in manifest order.
pub fn enabled(config: &GoalsConfig) -> Vec<Box<dyn Goal>> {
    config
        .iter()
        .filter(|(_, goal)| goal.enabled)
        .filter_map(|(kind, goal)| create(kind, goal))
        .collect()
}

/// Create the goal for one `[goals.<kind>]` table.
pub fn create(kind: &str, config: &GoalConfig) -> Option<Box<dyn Goal>> {
    let goal: Box<dyn Goal> = match kind {
        "component" => Box::new(ComponentGoal::new(config)),
        "urifactory" => Box::new(UriFactoryGoal::new(config)),
        "bean" => Box::new(BeanGoal::new(config)),
        "console" => Box::new(ConsoleGoal::new(config)),
        "transformer" => Box::new(TransformerGoal::new(config)),
        "configurer" => Box::new(ConfigurerGoal::new(config)),
        _ => return None,
    };
    Some(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_manifest_goal_has_a_generator() {
        let config = GoalsConfig::default();
        for (kind, goal) in config.iter() {
            let created = create(kind, goal).unwrap();
            assert_eq!(created.kind(), kind);
        }
    }

    #[test]
    fn test_disabled_goals_are_left_out() {
        let mut config = GoalsConfig::default();
        config.console.enabled = false;
        config.configurer.enabled = false;
        let kinds: Vec<_> = enabled(&config).iter().map(|g| g.kind()).collect();
        assert_eq!(kinds, vec!["component", "urifactory", "bean", "transformer"]);
    }
}
