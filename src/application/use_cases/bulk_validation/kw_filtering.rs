use super::{cell, SchemaValidator};
use crate::domain::bulk_upload::{
    InspectionCondition, KwFilteringField, KwFilteringRow, MappedRecord, SwitchFlag,
    TemplateKind, TemplateSchema, ValidRow, ValidationError,
};

/// Rules for the `kw-filtering` template
pub struct KwFilteringValidator;

impl SchemaValidator for KwFilteringValidator {
    fn schema(&self) -> TemplateSchema {
        TemplateSchema::for_kind(TemplateKind::KwFiltering)
    }

    fn validate_row(
        &self,
        record: &MappedRecord,
        row: usize,
    ) -> std::result::Result<ValidRow, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let value = |field: KwFilteringField| cell(record, field.header());

        let inspection_condition = {
            let field = KwFilteringField::InspectionCondition;
            let raw = value(field);
            if raw.is_empty() {
                errors.push(ValidationError::cell(
                    row,
                    field.header(),
                    "Inspection condition is required",
                ));
                None
            } else {
                let parsed = InspectionCondition::parse(raw);
                if parsed.is_none() {
                    errors.push(ValidationError::cell(
                        row,
                        field.header(),
                        format!(
                            "Inspection condition must be {}",
                            InspectionCondition::allowed_values()
                        ),
                    ));
                }
                parsed
            }
        };

        let holiday_execution = {
            let field = KwFilteringField::HolidayExecution;
            optional(value(field), SwitchFlag::parse).unwrap_or_else(|| {
                errors.push(ValidationError::cell(
                    row,
                    field.header(),
                    "Holiday execution must be ON or OFF",
                ));
                None
            })
        };

        let mut percent = |field: KwFilteringField| {
            optional(value(field), parse_percent).unwrap_or_else(|| {
                errors.push(ValidationError::cell(
                    row,
                    field.header(),
                    "Must be a valid number or percentage",
                ));
                None
            })
        };
        let performance_above_one = percent(KwFilteringField::PerformanceAboveOne);
        let performance_zero = percent(KwFilteringField::PerformanceZero);

        let calculation_period = {
            let field = KwFilteringField::CalculationPeriod;
            optional(value(field), |raw| raw.parse::<i64>().ok()).unwrap_or_else(|| {
                errors.push(ValidationError::cell(
                    row,
                    field.header(),
                    "Must be a valid number",
                ));
                None
            })
        };

        match inspection_condition {
            Some(inspection_condition) if errors.is_empty() => {
                Ok(ValidRow::KwFiltering(KwFilteringRow {
                    account_id: value(KwFilteringField::AccountId).to_string(),
                    account_name: value(KwFilteringField::AccountName).to_string(),
                    campaign_id: value(KwFilteringField::CampaignId).to_string(),
                    campaign_name: value(KwFilteringField::CampaignName).to_string(),
                    inspection_condition,
                    inspection_point: value(KwFilteringField::InspectionPoint).to_string(),
                    performance_above_one,
                    performance_zero,
                    calculation_period,
                    holiday_execution,
                }))
            }
            _ => Err(errors),
        }
    }
}

/// Parse an optional cell. `Some(None)` for an empty cell, `Some(Some(v))` on
/// success, `None` when a value is present but invalid.
fn optional<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if raw.is_empty() {
        Some(None)
    } else {
        parse(raw).map(Some)
    }
}

/// `"50%"`, `"50"` and `"12.5 %"` are accepted; non-finite values are not.
fn parse_percent(raw: &str) -> Option<f64> {
    let number = raw.strip_suffix('%').unwrap_or(raw).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}
