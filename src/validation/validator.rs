use std::collections::BTreeMap;
use std::num::IntErrorKind;

use super::errors::{ValidationError, ValidationErrorKind, ValidationErrors};
use super::rules::{FieldKind, Rule, RULES};
use super::value::{FieldValue, ValidatedInput};

/// Validates raw form pairs against the rule table.
///
/// Each declared field is checked independently and every problem is
/// collected; keys that are not in the table are ignored. When the key
/// appears more than once, the first occurrence wins.
pub fn validate(form: &[(String, String)]) -> Result<ValidatedInput, ValidationErrors> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for rule in RULES.iter() {
        let raw = form
            .iter()
            .find(|(k, _)| k == rule.field.key())
            .map(|(_, v)| v.trim())
            .unwrap_or("");

        match check_field(rule, raw) {
            Ok(value) => {
                values.insert(rule.field, value);
            }
            Err(mut field_errors) => errors.append(&mut field_errors),
        }
    }

    if errors.is_empty() {
        Ok(ValidatedInput::from_values(values))
    } else {
        Err(ValidationErrors::new(errors))
    }
}

fn check_field(rule: &Rule, raw: &str) -> Result<FieldValue, Vec<ValidationError>> {
    let fail = |kind| vec![ValidationError::new(rule.field, kind)];

    if raw.is_empty() {
        return Err(fail(ValidationErrorKind::Required));
    }

    let value = convert(rule.kind, raw).map_err(fail)?;

    let n = value.as_f64();
    let mut errors = Vec::new();
    if rule.min.map_or(false, |min| n < min) {
        errors.push(ValidationError::new(rule.field, ValidationErrorKind::BelowMin));
    }
    if rule.max.map_or(false, |max| n > max) {
        errors.push(ValidationError::new(rule.field, ValidationErrorKind::AboveMax));
    }

    if errors.is_empty() { Ok(value) } else { Err(errors) }
}

fn convert(kind: FieldKind, raw: &str) -> Result<FieldValue, ValidationErrorKind> {
    match kind {
        FieldKind::Real => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(FieldValue::Real(v)),
            _ => Err(ValidationErrorKind::NotANumber),
        },
        FieldKind::Integer => raw.parse::<i64>().map(FieldValue::Integer).map_err(|e| {
            // A well-formed integer too large for i64 is out of bounds, not malformed.
            match e.kind() {
                IntErrorKind::PosOverflow => ValidationErrorKind::AboveMax,
                IntErrorKind::NegOverflow => ValidationErrorKind::BelowMin,
                _ => ValidationErrorKind::NotANumber,
            }
        }),
        FieldKind::Binary => match raw.parse::<i64>() {
            Ok(0) => Ok(FieldValue::Binary(false)),
            Ok(1) => Ok(FieldValue::Binary(true)),
            Ok(_) => Err(ValidationErrorKind::NotBinary),
            // Numeric but not an integer ("0.5", "1.0") is still a binary violation.
            Err(_) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Err(ValidationErrorKind::NotBinary),
                _ => Err(ValidationErrorKind::NotANumber),
            },
        },
    }
}

/// A complete submission where every field sits at a plausible valid value.
#[cfg(test)]
pub(crate) fn sample_form() -> Vec<(String, String)> {
    [
        ("cycle_length", "28"),
        ("period_length", "5"),
        ("age", "27"),
        ("CycleWithPeakorNot", "1"),
        ("EstimatedDayofOvulation", "14"),
        ("FirstDayofHigh", "12"),
        ("LengthofLutealPhase", "13"),
        ("NumberofDaysofIntercourse", "4"),
        ("TotalNumberofHighDays", "5"),
        ("TotalHighPostPeak", "2"),
        ("TotalNumberofPeakDays", "2"),
        ("TotalDaysofFertility", "8"),
        ("TotalFertilityFormula", "9"),
        ("LengthofMenses", "5"),
        ("UnusualBleeding", "0"),
        ("DietScore", "4"),
        ("ReproHealthScore", "3"),
        ("StressScore", "2"),
        ("IntercourseInFertileWindow", "1"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
pub(crate) fn with_value(mut form: Vec<(String, String)>, key: &str, value: &str) -> Vec<(String, String)> {
    for (k, v) in form.iter_mut() {
        if k == key {
            *v = value.to_owned();
        }
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::Field;

    fn errors_for(form: &[(String, String)], field: Field) -> Vec<ValidationError> {
        match validate(form) {
            Ok(_) => vec![],
            Err(e) => e.for_field(field).cloned().collect(),
        }
    }

    /// Renders a bound as the form would submit it.
    fn text(v: f64) -> String {
        format!("{}", v)
    }

    #[test]
    fn sample_form_is_valid() {
        let input = validate(&sample_form()).expect("sample form should validate");
        assert_eq!(input.len(), Field::COUNT);
        assert_eq!(input.get(Field::CycleLength), Some(FieldValue::Real(28.0)));
        assert_eq!(input.get(Field::DietScore), Some(FieldValue::Integer(4)));
        assert_eq!(input.get(Field::UnusualBleeding), Some(FieldValue::Binary(false)));
    }

    #[test]
    fn blank_or_absent_yields_only_required_message() {
        for field in Field::ALL {
            for blank in ["", "   "] {
                let form = with_value(sample_form(), field.key(), blank);
                let errs = validate(&form).unwrap_err();
                assert_eq!(errs.len(), 1, "{:?}", field);
                assert_eq!(errs.errors()[0].kind, ValidationErrorKind::Required);
                assert_eq!(errs.errors()[0].message, format!("{} harus diisi", field.display_name()));
            }

            let absent: Vec<_> = sample_form().into_iter().filter(|(k, _)| k != field.key()).collect();
            let errs = validate(&absent).unwrap_err();
            assert_eq!(errs.len(), 1);
            assert_eq!(errs.errors()[0].field, field);
            assert_eq!(errs.errors()[0].kind, ValidationErrorKind::Required);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        for rule in RULES.iter().filter(|r| r.kind != FieldKind::Binary) {
            let (min, max) = (rule.min.unwrap(), rule.max.unwrap());
            for v in [min, max] {
                let form = with_value(sample_form(), rule.field.key(), &text(v));
                assert!(validate(&form).is_ok(), "{:?} = {}", rule.field, v);
            }
        }
    }

    #[test]
    fn values_just_outside_bounds_fail() {
        for rule in RULES.iter().filter(|r| r.kind != FieldKind::Binary) {
            let eps = if rule.kind == FieldKind::Real { 0.01 } else { 1.0 };
            let (min, max) = (rule.min.unwrap(), rule.max.unwrap());

            let below = with_value(sample_form(), rule.field.key(), &text(min - eps));
            let errs = errors_for(&below, rule.field);
            assert_eq!(errs.len(), 1, "{:?}", rule.field);
            assert_eq!(errs[0].kind, ValidationErrorKind::BelowMin);
            assert_eq!(errs[0].message, format!("{} minimal {}", rule.name, min));

            let above = with_value(sample_form(), rule.field.key(), &text(max + eps));
            let errs = errors_for(&above, rule.field);
            assert_eq!(errs.len(), 1, "{:?}", rule.field);
            assert_eq!(errs[0].kind, ValidationErrorKind::AboveMax);
            assert_eq!(errs[0].message, format!("{} maksimal {}", rule.name, max));
        }
    }

    #[test]
    fn bound_messages_print_whole_numbers() {
        let form = with_value(sample_form(), "age", "14.5");
        let errs = validate(&form).unwrap_err();
        assert!(errs.contains_message("Usia minimal 15"));
    }

    #[test]
    fn binary_fields_accept_only_zero_and_one() {
        let binaries = RULES.iter().filter(|r| r.kind == FieldKind::Binary);
        for rule in binaries {
            for ok in ["0", "1", " 1 "] {
                let form = with_value(sample_form(), rule.field.key(), ok);
                assert!(validate(&form).is_ok(), "{:?} = {:?}", rule.field, ok);
            }
            for bad in ["2", "-1", "0.5", "1.0", "10"] {
                let form = with_value(sample_form(), rule.field.key(), bad);
                let errs = errors_for(&form, rule.field);
                assert_eq!(errs.len(), 1);
                assert_eq!(errs[0].kind, ValidationErrorKind::NotBinary);
                assert_eq!(errs[0].message, format!("{} harus 0 atau 1", rule.name));
            }
        }
    }

    #[test]
    fn non_numeric_text_suppresses_bound_checks() {
        for field in Field::ALL {
            let form = with_value(sample_form(), field.key(), "abc");
            let errs = errors_for(&form, field);
            assert_eq!(errs.len(), 1, "{:?}", field);
            assert_eq!(errs[0].kind, ValidationErrorKind::NotANumber);
            assert_eq!(errs[0].message, format!("{} harus berupa angka yang valid", field.display_name()));
        }
    }

    #[test]
    fn integer_fields_reject_decimals() {
        let form = with_value(sample_form(), "DietScore", "3.0");
        let errs = errors_for(&form, Field::DietScore);
        assert_eq!(errs[0].kind, ValidationErrorKind::NotANumber);
    }

    #[test]
    fn oversized_integers_report_the_bound() {
        let form = with_value(sample_form(), "DietScore", "99999999999999999999");
        let errs = errors_for(&form, Field::DietScore);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::AboveMax);
        assert_eq!(errs[0].message, "Skor Diet maksimal 5");

        let form = with_value(sample_form(), "StressScore", "-99999999999999999999");
        let errs = errors_for(&form, Field::StressScore);
        assert_eq!(errs[0].kind, ValidationErrorKind::BelowMin);
        assert_eq!(errs[0].message, "Skor Stres minimal 1");
    }

    #[test]
    fn real_fields_reject_non_finite() {
        for raw in ["nan", "inf", "-inf", "NaN"] {
            let form = with_value(sample_form(), "cycle_length", raw);
            let errs = errors_for(&form, Field::CycleLength);
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].kind, ValidationErrorKind::NotANumber);
        }
    }

    #[test]
    fn errors_are_aggregated_in_table_order() {
        let mut form = with_value(sample_form(), "age", "");
        form = with_value(form, "cycle_length", "99");
        form = with_value(form, "StressScore", "x");
        let errs = validate(&form).unwrap_err();
        let fields: Vec<Field> = errs.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::CycleLength, Field::Age, Field::StressScore]);
        assert_eq!(
            errs.to_string(),
            "Panjang Siklus maksimal 50\nUsia harus diisi\nSkor Stres harus berupa angka yang valid"
        );
    }

    #[test]
    fn unknown_keys_are_ignored_and_first_occurrence_wins() {
        let mut form = sample_form();
        form.push(("csrf".into(), "whatever".into()));
        form.push(("age".into(), "not a number".into()));
        let input = validate(&form).unwrap();
        assert_eq!(input.get(Field::Age), Some(FieldValue::Real(27.0)));
    }
}
