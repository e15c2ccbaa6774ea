// ============================================================
// TEMPLATE SCHEMAS
// ============================================================
// Required header literals and their typed fields, per template kind.
// The header strings are the wire contract with the template generator.

use super::{MappedRecord, TemplateKind};

const INCLUDE_GENRE_HEADERS: [&str; 6] = [
    "設定ジャンル1",
    "設定ジャンル2",
    "設定ジャンル3",
    "設定ジャンル4",
    "設定ジャンル5",
    "設定ジャンル6",
];

const EXCLUDE_GENRE_HEADERS: [&str; 5] = [
    "除外ジャンル1",
    "除外ジャンル2",
    "除外ジャンル3",
    "除外ジャンル4",
    "除外ジャンル5",
];

/// Columns of the `kw-filtering` template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KwFilteringField {
    AccountId,
    AccountName,
    CampaignId,
    CampaignName,
    InspectionCondition,
    InspectionPoint,
    PerformanceAboveOne,
    PerformanceZero,
    CalculationPeriod,
    HolidayExecution,
}

impl KwFilteringField {
    pub const ALL: [KwFilteringField; 10] = [
        KwFilteringField::AccountId,
        KwFilteringField::AccountName,
        KwFilteringField::CampaignId,
        KwFilteringField::CampaignName,
        KwFilteringField::InspectionCondition,
        KwFilteringField::InspectionPoint,
        KwFilteringField::PerformanceAboveOne,
        KwFilteringField::PerformanceZero,
        KwFilteringField::CalculationPeriod,
        KwFilteringField::HolidayExecution,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            KwFilteringField::AccountId => "アカウントID",
            KwFilteringField::AccountName => "アカウント名",
            KwFilteringField::CampaignId => "キャンペーンID",
            KwFilteringField::CampaignName => "キャンペーン名",
            KwFilteringField::InspectionCondition => "精査軸",
            KwFilteringField::InspectionPoint => "精査ポイント",
            KwFilteringField::PerformanceAboveOne => "実績=1以上の場合、平均対比で○○%で停止",
            KwFilteringField::PerformanceZero => "実績=0の場合、平均対比で○○%で停止",
            KwFilteringField::CalculationPeriod => "平均実績の計算期間 前○○日間",
            KwFilteringField::HolidayExecution => "休日実行",
        }
    }

    pub fn value<'a>(&self, record: &'a MappedRecord) -> &'a str {
        record.get(self.header())
    }
}

/// Columns of the `genre-keyword` template. Genre slots are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreKeywordField {
    AccountId,
    AccountName,
    CampaignId,
    CampaignName,
    AdgroupId,
    AdgroupName,
    SubmitFlag,
    IncludeGenre(usize),
    ExcludeGenre(usize),
    IncludeKeywords,
    ExcludeKeywords,
}

impl GenreKeywordField {
    pub const INCLUDE_GENRE_SLOTS: usize = INCLUDE_GENRE_HEADERS.len();
    pub const EXCLUDE_GENRE_SLOTS: usize = EXCLUDE_GENRE_HEADERS.len();

    pub const ALL: [GenreKeywordField; 20] = [
        GenreKeywordField::AccountId,
        GenreKeywordField::AccountName,
        GenreKeywordField::CampaignId,
        GenreKeywordField::CampaignName,
        GenreKeywordField::AdgroupId,
        GenreKeywordField::AdgroupName,
        GenreKeywordField::SubmitFlag,
        GenreKeywordField::IncludeGenre(0),
        GenreKeywordField::IncludeGenre(1),
        GenreKeywordField::IncludeGenre(2),
        GenreKeywordField::IncludeGenre(3),
        GenreKeywordField::IncludeGenre(4),
        GenreKeywordField::IncludeGenre(5),
        GenreKeywordField::ExcludeGenre(0),
        GenreKeywordField::ExcludeGenre(1),
        GenreKeywordField::ExcludeGenre(2),
        GenreKeywordField::ExcludeGenre(3),
        GenreKeywordField::ExcludeGenre(4),
        GenreKeywordField::IncludeKeywords,
        GenreKeywordField::ExcludeKeywords,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            GenreKeywordField::AccountId => "アカウントID",
            GenreKeywordField::AccountName => "アカウント名",
            GenreKeywordField::CampaignId => "キャンペーンID",
            GenreKeywordField::CampaignName => "キャンペーン名",
            GenreKeywordField::AdgroupId => "広告グループID",
            GenreKeywordField::AdgroupName => "広告グループ名",
            GenreKeywordField::SubmitFlag => "入稿フラグ",
            GenreKeywordField::IncludeGenre(slot) => INCLUDE_GENRE_HEADERS[*slot],
            GenreKeywordField::ExcludeGenre(slot) => EXCLUDE_GENRE_HEADERS[*slot],
            GenreKeywordField::IncludeKeywords => "固定キーワード設定",
            GenreKeywordField::ExcludeKeywords => "固定キーワード除外",
        }
    }

    pub fn value<'a>(&self, record: &'a MappedRecord) -> &'a str {
        record.get(self.header())
    }

    pub fn include_genres() -> impl Iterator<Item = GenreKeywordField> {
        (0..Self::INCLUDE_GENRE_SLOTS).map(GenreKeywordField::IncludeGenre)
    }

    pub fn exclude_genres() -> impl Iterator<Item = GenreKeywordField> {
        (0..Self::EXCLUDE_GENRE_SLOTS).map(GenreKeywordField::ExcludeGenre)
    }
}

/// Schema descriptor: the typed column set of one template kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSchema {
    KwFiltering(&'static [KwFilteringField]),
    GenreKeyword(&'static [GenreKeywordField]),
}

impl TemplateSchema {
    pub fn for_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::KwFiltering => TemplateSchema::KwFiltering(&KwFilteringField::ALL),
            TemplateKind::GenreKeyword => TemplateSchema::GenreKeyword(&GenreKeywordField::ALL),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            TemplateSchema::KwFiltering(_) => TemplateKind::KwFiltering,
            TemplateSchema::GenreKeyword(_) => TemplateKind::GenreKeyword,
        }
    }

    /// Required headers in template display order.
    pub fn required_headers(&self) -> Vec<&'static str> {
        match self {
            TemplateSchema::KwFiltering(fields) => fields.iter().map(|f| f.header()).collect(),
            TemplateSchema::GenreKeyword(fields) => fields.iter().map(|f| f.header()).collect(),
        }
    }

    /// Required headers absent from `record`, in display order.
    pub fn missing_headers(&self, record: &MappedRecord) -> Vec<&'static str> {
        self.required_headers()
            .into_iter()
            .filter(|header| !record.contains_header(header))
            .collect()
    }
}
