// ============================================================
// VALIDATED ROW TYPES
// ============================================================

use serde::{Deserialize, Serialize};

use super::{Genre, InspectionCondition, SwitchFlag};

/// A `kw-filtering` row that passed every field rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KwFilteringRow {
    pub account_id: String,
    pub account_name: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub inspection_condition: InspectionCondition,
    pub inspection_point: String,

    /// Percent value with any trailing `%` removed
    pub performance_above_one: Option<f64>,
    pub performance_zero: Option<f64>,

    /// Days
    pub calculation_period: Option<i64>,
    pub holiday_execution: Option<SwitchFlag>,
}

/// A `genre-keyword` row with its genre columns compacted, empties dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreKeywordRow {
    pub account_id: String,
    pub account_name: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub adgroup_id: String,
    pub adgroup_name: String,
    pub submit_flag: Option<SwitchFlag>,
    pub include_genres: Vec<Genre>,
    pub exclude_genres: Vec<Genre>,
    pub include_keywords: String,
    pub exclude_keywords: String,
}
