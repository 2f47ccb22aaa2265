//! Catalogue of the derived feature columns.
//!
//! Column names that carry the rolling window width are built here so every
//! stage and the CLI agree on them.

use serde::{Deserialize, Serialize};

/// Feature group classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    /// Schedule density of the row's own team
    Rest,
    /// Trailing offensive output of the row's own team
    Form,
    /// Form discounted for back-to-back games
    Fatigue,
    /// Trailing form and rest of the opposing team
    Opponent,
}

impl FeatureGroup {
    /// Get a human-readable description of the group.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Rest => "Rest days and back-to-back flags",
            Self::Form => "Lag-1 rolling means of offensive output",
            Self::Fatigue => "Rolling form scaled by a back-to-back penalty",
            Self::Opponent => "Opponent rest and rolling defensive form",
        }
    }
}

/// Metadata about one derived column.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInfo {
    /// Output column name
    pub name: String,

    /// Group classification
    pub group: FeatureGroup,

    /// Human-readable description
    pub description: &'static str,

    /// Output value type
    pub dtype: &'static str,

    /// Whether the column can hold nulls for short histories
    pub nullable: bool,
}

/// Days of rest before the game.
pub const DAYS_REST: &str = "days_rest";
/// 1 if the game follows the previous one with no day off.
pub const BACK_TO_BACK: &str = "back_to_back";
/// Multiplier applied to rolling form.
pub const FATIGUE_PENALTY: &str = "fatigue_penalty";
/// Fatigue-adjusted rolling goals.
pub const FATIGUE_ADJ_GOALS: &str = "fatigue_adj_goals";
/// Fatigue-adjusted rolling expected goals.
pub const FATIGUE_ADJ_XG: &str = "fatigue_adj_xg";
/// Opponent's days of rest before the game.
pub const OPP_DAYS_REST: &str = "opp_days_rest";

/// `rolling_goals_{window}`.
#[must_use]
pub fn rolling_goals_column(window: usize) -> String {
    format!("rolling_goals_{window}")
}

/// `rolling_xg_{window}`.
#[must_use]
pub fn rolling_xg_column(window: usize) -> String {
    format!("rolling_xg_{window}")
}

/// `opp_rolling_xg_against_{window}`.
#[must_use]
pub fn opp_rolling_xg_against_column(window: usize) -> String {
    format!("opp_rolling_xg_against_{window}")
}

/// Information about every derived column, in output order.
#[must_use]
pub fn available_features(window: usize) -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            name: DAYS_REST.to_string(),
            group: FeatureGroup::Rest,
            description: "Full days off since the team's previous game (first game: default)",
            dtype: "i64",
            nullable: false,
        },
        FeatureInfo {
            name: BACK_TO_BACK.to_string(),
            group: FeatureGroup::Rest,
            description: "1 when days_rest is 0, else 0",
            dtype: "i32",
            nullable: false,
        },
        FeatureInfo {
            name: rolling_goals_column(window),
            group: FeatureGroup::Form,
            description: "Mean goalsFor over prior games, expanding mean until the window fills",
            dtype: "f64",
            nullable: true,
        },
        FeatureInfo {
            name: rolling_xg_column(window),
            group: FeatureGroup::Form,
            description: "Mean xGoalsFor over prior games, expanding mean until the window fills",
            dtype: "f64",
            nullable: true,
        },
        FeatureInfo {
            name: FATIGUE_PENALTY.to_string(),
            group: FeatureGroup::Fatigue,
            description: "1 - discount * back_to_back",
            dtype: "f64",
            nullable: false,
        },
        FeatureInfo {
            name: FATIGUE_ADJ_GOALS.to_string(),
            group: FeatureGroup::Fatigue,
            description: "Rolling goals times fatigue_penalty",
            dtype: "f64",
            nullable: true,
        },
        FeatureInfo {
            name: FATIGUE_ADJ_XG.to_string(),
            group: FeatureGroup::Fatigue,
            description: "Rolling expected goals times fatigue_penalty",
            dtype: "f64",
            nullable: true,
        },
        FeatureInfo {
            name: opp_rolling_xg_against_column(window),
            group: FeatureGroup::Opponent,
            description: "Rolling xGoalsAgainst over the opposing team's own prior games",
            dtype: "f64",
            nullable: true,
        },
        FeatureInfo {
            name: OPP_DAYS_REST.to_string(),
            group: FeatureGroup::Opponent,
            description: "Full days off since the opposing team's previous game",
            dtype: "i64",
            nullable: false,
        },
    ]
}

/// Get all features in a specific group.
#[must_use]
pub fn features_by_group(group: FeatureGroup, window: usize) -> Vec<FeatureInfo> {
    available_features(window)
        .into_iter()
        .filter(|info| info.group == group)
        .collect()
}

/// Get information about a specific column by name.
#[must_use]
pub fn get_feature_info(name: &str, window: usize) -> Option<FeatureInfo> {
    available_features(window)
        .into_iter()
        .find(|info| info.name == name)
}
