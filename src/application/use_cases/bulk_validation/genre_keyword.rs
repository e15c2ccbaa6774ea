use super::{cell, SchemaValidator};
use crate::domain::bulk_upload::{
    Genre, GenreKeywordField, GenreKeywordRow, MappedRecord, SwitchFlag, TemplateKind,
    TemplateSchema, ValidRow, ValidationError,
};

/// Rules for the `genre-keyword` template
pub struct GenreKeywordValidator;

impl GenreKeywordValidator {
    /// Check one group of genre columns, compacting the non-empty ones in
    /// column order. Each invalid cell adds its own error.
    fn genres(
        record: &MappedRecord,
        row: usize,
        fields: impl Iterator<Item = GenreKeywordField>,
        errors: &mut Vec<ValidationError>,
    ) -> Vec<Genre> {
        let mut genres = Vec::new();
        for field in fields {
            let raw = cell(record, field.header());
            if raw.is_empty() {
                continue;
            }
            match Genre::from_label(raw) {
                Some(genre) => genres.push(genre),
                None => errors.push(ValidationError::cell(row, field.header(), "Invalid genre value")),
            }
        }
        genres
    }
}

impl SchemaValidator for GenreKeywordValidator {
    fn schema(&self) -> TemplateSchema {
        TemplateSchema::for_kind(TemplateKind::GenreKeyword)
    }

    fn validate_row(
        &self,
        record: &MappedRecord,
        row: usize,
    ) -> std::result::Result<ValidRow, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let value = |field: GenreKeywordField| cell(record, field.header());

        let submit_flag = match value(GenreKeywordField::SubmitFlag) {
            "" => None,
            raw => {
                let flag = SwitchFlag::parse(raw);
                if flag.is_none() {
                    errors.push(ValidationError::cell(
                        row,
                        GenreKeywordField::SubmitFlag.header(),
                        "Submit flag must be ON or OFF",
                    ));
                }
                flag
            }
        };

        let include_genres =
            Self::genres(record, row, GenreKeywordField::include_genres(), &mut errors);
        let exclude_genres =
            Self::genres(record, row, GenreKeywordField::exclude_genres(), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidRow::GenreKeyword(GenreKeywordRow {
            account_id: value(GenreKeywordField::AccountId).to_string(),
            account_name: value(GenreKeywordField::AccountName).to_string(),
            campaign_id: value(GenreKeywordField::CampaignId).to_string(),
            campaign_name: value(GenreKeywordField::CampaignName).to_string(),
            adgroup_id: value(GenreKeywordField::AdgroupId).to_string(),
            adgroup_name: value(GenreKeywordField::AdgroupName).to_string(),
            submit_flag,
            include_genres,
            exclude_genres,
            include_keywords: value(GenreKeywordField::IncludeKeywords).to_string(),
            exclude_keywords: value(GenreKeywordField::ExcludeKeywords).to_string(),
        }))
    }
}
