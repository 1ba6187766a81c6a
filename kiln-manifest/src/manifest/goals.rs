use serde::Deserialize;

/// Options shared by every goal, plus the few kind specific keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GoalConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Override of the primary marker the goal looks for
    pub marker: Option<String>,

    /// Fail the goal when no marked symbols are found
    #[serde(default)]
    pub require_symbols: bool,

    /// Extra classes to generate configurers for (configurer only)
    #[serde(default)]
    pub classes: Vec<String>,

    /// Markers used to discover endpoint options (component and urifactory only)
    #[serde(default)]
    pub option_markers: Vec<String>,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker: None,
            require_symbols: false,
            classes: Vec::new(),
            option_markers: Vec::new(),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

impl GoalConfig {
    /// Canonical text of the options, used as fingerprint input.
    pub fn canonical(&self) -> String {
        let mut classes = self.classes.clone();
        classes.sort();
        let mut option_markers = self.option_markers.clone();
        option_markers.sort();
        format!(
            "enabled={};marker={};require-symbols={};classes={};option-markers={}",
            self.enabled,
            self.marker.as_deref().unwrap_or(""),
            self.require_symbols,
            classes.join(","),
            option_markers.join(","),
        )
    }
}

/// `[goals.*]` tables, one per artifact kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalsConfig {
    #[serde(default)]
    pub component: GoalConfig,
    #[serde(default)]
    pub urifactory: GoalConfig,
    #[serde(default)]
    pub bean: GoalConfig,
    #[serde(default)]
    pub console: GoalConfig,
    #[serde(default)]
    pub transformer: GoalConfig,
    #[serde(default)]
    pub configurer: GoalConfig,
}

impl GoalsConfig {
    /// All goals in a fixed order, keyed by their table name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &GoalConfig)> {
        [
            ("component", &self.component),
            ("urifactory", &self.urifactory),
            ("bean", &self.bean),
            ("console", &self.console),
            ("transformer", &self.transformer),
            ("configurer", &self.configurer),
        ]
        .into_iter()
    }

    pub fn get(&self, kind: &str) -> Option<&GoalConfig> {
        self.iter().find(|(k, _)| *k == kind).map(|(_, g)| g)
    }
}
