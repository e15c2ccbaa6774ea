// ============================================================
// CONTROLLED VOCABULARIES
// ============================================================
// Closed value sets shared by template generation and validation

use serde::{Deserialize, Serialize};

/// Inspection axis of a keyword filtering rule (`精査軸`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionCondition {
    #[serde(rename = "CPA")]
    Cpa,
    #[serde(rename = "CPC")]
    Cpc,
    #[serde(rename = "CPM")]
    Cpm,
}

impl InspectionCondition {
    pub const ALL: [InspectionCondition; 3] = [
        InspectionCondition::Cpa,
        InspectionCondition::Cpc,
        InspectionCondition::Cpm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionCondition::Cpa => "CPA",
            InspectionCondition::Cpc => "CPC",
            InspectionCondition::Cpm => "CPM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    /// "CPA, CPC, CPM"
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// ON/OFF switch used by `休日実行` and `入稿フラグ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchFlag {
    On,
    Off,
}

impl SwitchFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchFlag::On => "ON",
            SwitchFlag::Off => "OFF",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ON" => Some(SwitchFlag::On),
            "OFF" => Some(SwitchFlag::Off),
            _ => None,
        }
    }
}

/// Genre categories accepted in the include/exclude genre columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "エンターテイメント")]
    Entertainment,
    #[serde(rename = "アニメ・ゲーム")]
    AnimeGames,
    #[serde(rename = "スポーツ")]
    Sports,
    #[serde(rename = "社会・政治・ニュース")]
    SocietyPoliticsNews,
    #[serde(rename = "ライフスタイル・健康・フード")]
    LifestyleHealthFood,
    #[serde(rename = "その他")]
    Other,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Entertainment,
        Genre::AnimeGames,
        Genre::Sports,
        Genre::SocietyPoliticsNews,
        Genre::LifestyleHealthFood,
        Genre::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Entertainment => "エンターテイメント",
            Genre::AnimeGames => "アニメ・ゲーム",
            Genre::Sports => "スポーツ",
            Genre::SocietyPoliticsNews => "社会・政治・ニュース",
            Genre::LifestyleHealthFood => "ライフスタイル・健康・フード",
            Genre::Other => "その他",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == value)
    }
}
