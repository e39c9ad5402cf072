use log::error;

use siklus::validation::{FieldKind, Rule, RULES};
use siklus::{FormOutcome, ResultView};

use crate::render::{render_page, Page};
use crate::routes::{html_response, BodyError, HttpReply};
use crate::state::AppState;
use crate::util::form::parse_form;
use crate::util::html::html_escape;

// ---------------------------------------------------------------------------
// GET /form
// ---------------------------------------------------------------------------

pub fn handle_get(state: &AppState) -> HttpReply {
    let outcome = state.form.handle_get();
    html_response(200, render_outcome(&outcome, &[]))
}

// ---------------------------------------------------------------------------
// POST /form
// ---------------------------------------------------------------------------

pub fn handle_post(body: Result<&[u8], BodyError>, state: &AppState) -> HttpReply {
    // Without a model the body is never looked at.
    if !state.form.is_available() {
        return html_response(200, render_outcome(&state.form.handle_post(&[]), &[]));
    }

    let text = match body {
        Ok(bytes) => match std::str::from_utf8(bytes) {
            Ok(t) => t,
            Err(e) => {
                error!("form body is not UTF-8: {}", e);
                return html_response(200, render_outcome(&FormOutcome::Failed, &[]));
            }
        },
        Err(e) => {
            error!("could not read form body: {}", e);
            return html_response(200, render_outcome(&FormOutcome::Failed, &[]));
        }
    };

    let pairs = parse_form(text);
    let outcome = state.form.handle_post(&pairs);
    html_response(200, render_outcome(&outcome, &pairs))
}

// ---------------------------------------------------------------------------
// Page builders
// ---------------------------------------------------------------------------

/// Renders the result page for a prediction, otherwise the form (with a
/// banner when the outcome carries one). Submitted values are echoed back
/// into the form so the user only has to fix the flagged fields.
pub fn render_outcome(outcome: &FormOutcome, submitted: &[(String, String)]) -> String {
    if let FormOutcome::Result(view) = outcome {
        return build_result_page(view);
    }

    let banner = match outcome {
        FormOutcome::Invalid(errors) => Some(
            errors.messages().map(html_escape).collect::<Vec<_>>().join("<br>"),
        ),
        other => other.banner().map(|b| html_escape(&b)),
    };
    let banner_html = banner
        .map(|msg| {
            format!(
                r#"<div id="form-error" role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-6">{}</div>"#,
                msg
            )
        })
        .unwrap_or_default();

    let fields = RULES
        .iter()
        .map(|rule| {
            let value = submitted
                .iter()
                .find(|(k, _)| k == rule.field.key())
                .map(|(_, v)| v.trim())
                .unwrap_or("");
            field_html(rule, value)
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    render_page(Page::Form, |tmpl| {
        tmpl.replace("{{ERROR_BANNER}}", &banner_html)
            .replace("{{FIELDS}}", &fields)
    })
}

fn field_html(rule: &Rule, value: &str) -> String {
    let key  = rule.field.key();
    let name = html_escape(rule.name);

    let control = match rule.kind {
        FieldKind::Binary => {
            let option = |v: &str, label: &str| {
                let sel = if value == v { " selected" } else { "" };
                format!(r#"<option value="{}"{}>{}</option>"#, v, sel, label)
            };
            format!(
                r#"<select id="{key}" name="{key}" class="w-full border rounded px-3 py-2">{empty}{no}{yes}</select>"#,
                key   = key,
                empty = option("", "-- pilih --"),
                no    = option("0", "Tidak (0)"),
                yes   = option("1", "Ya (1)"),
            )
        }
        kind => {
            let step = if kind == FieldKind::Real { "any" } else { "1" };
            format!(
                r#"<input type="number" id="{key}" name="{key}" step="{step}" min="{min}" max="{max}" value="{value}" class="w-full border rounded px-3 py-2">"#,
                key   = key,
                step  = step,
                min   = rule.min.map(|v| v.to_string()).unwrap_or_default(),
                max   = rule.max.map(|v| v.to_string()).unwrap_or_default(),
                value = html_escape(value),
            )
        }
    };

    let hint = match (rule.min, rule.max) {
        (Some(min), Some(max)) => format!(r#"<p class="text-xs text-gray-500 mt-1">{} – {}</p>"#, min, max),
        _ => String::new(),
    };

    format!(
        r#"<div><label for="{key}" class="block font-medium mb-1">{name}</label>{control}{hint}</div>"#,
        key = key,
        name = name,
        control = control,
        hint = hint,
    )
}

fn build_result_page(view: &ResultView) -> String {
    let details: String = view
        .display
        .rows
        .iter()
        .map(|row| {
            format!(
                r#"      <tr id="detail-{key}" class="border-b"><th class="py-2 pr-4 font-medium text-gray-600">{label}</th><td class="py-2">{value}</td></tr>"#,
                key   = row.key,
                label = html_escape(row.label),
                value = html_escape(&row.value),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    render_page(Page::Result, |tmpl| {
        tmpl.replace("{{PREDICTION_CLASS}}", view.css_class())
            .replace("{{PREDICTION}}", &html_escape(view.label()))
            .replace("{{PROBABILITY}}", &format!("{:.1}", view.probability()))
            .replace("{{DETAILS}}", &details)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use siklus::features::FeatureVector;
    use siklus::{FormHandler, Prediction, PredictError, Predictor};

    struct Fixed(Prediction);

    impl Predictor for Fixed {
        fn predict(&self, _: &FeatureVector) -> Result<Prediction, PredictError> {
            Ok(self.0)
        }
    }

    fn state(prediction: Prediction) -> AppState {
        AppState::new(FormHandler::new(Arc::new(Fixed(prediction))))
    }

    fn body_string(reply: HttpReply) -> String {
        String::from_utf8(reply.body).unwrap()
    }

    const VALID_BODY: &str = "cycle_length=28&period_length=5&age=27&CycleWithPeakorNot=1\
        &EstimatedDayofOvulation=14&FirstDayofHigh=12&LengthofLutealPhase=13\
        &NumberofDaysofIntercourse=4&TotalNumberofHighDays=5&TotalHighPostPeak=2\
        &TotalNumberofPeakDays=2&TotalDaysofFertility=8&TotalFertilityFormula=9\
        &LengthofMenses=5&UnusualBleeding=0&DietScore=4&ReproHealthScore=3\
        &StressScore=2&IntercourseInFertileWindow=1";

    #[test]
    fn get_shows_every_field() {
        let html = body_string(handle_get(&state(Prediction::new(0, 50.0))));
        for rule in RULES.iter() {
            assert!(html.contains(&format!(r#"name="{}""#, rule.field.key())), "{}", rule.field.key());
        }
        assert!(!html.contains("form-error"));
    }

    #[test]
    fn valid_post_renders_result_page() {
        let st = state(Prediction::new(0, 87.3));
        let reply = handle_post(Ok(VALID_BODY.as_bytes()), &st);
        assert_eq!(reply.status, 200);
        let html = body_string(reply);
        assert!(html.contains(r#"class="text-4xl font-bold text-green-600">Siklus Sedang</p>"#));
        assert!(html.contains("87.3%"));
        assert!(html.contains("28.0 hari"));
        assert!(html.contains(
            r#"<tr id="detail-stress" class="border-b"><th class="py-2 pr-4 font-medium text-gray-600">Skor Stres</th><td class="py-2">Sedang</td></tr>"#
        ));
    }

    #[test]
    fn missing_age_renders_form_with_message() {
        let st = state(Prediction::new(0, 87.3));
        let body = VALID_BODY.replace("&age=27", "");
        let html = body_string(handle_post(Ok(body.as_bytes()), &st));
        assert!(html.contains("Usia harus diisi"));
        assert!(html.contains("form-error"));
        // Submitted values are kept.
        assert!(html.contains(r#"name="cycle_length" step="any" min="15" max="50" value="28""#));
    }

    #[test]
    fn echoed_values_are_escaped() {
        let st = state(Prediction::new(0, 87.3));
        let body = VALID_BODY.replace("age=27", "age=%22%3E%3Cscript%3E");
        let html = body_string(handle_post(Ok(body.as_bytes()), &st));
        assert!(html.contains("Usia harus berupa angka yang valid"));
        assert!(!html.contains("\"><script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn braces_in_values_keep_every_field() {
        let st = state(Prediction::new(0, 87.3));
        let html = body_string(handle_post(Ok(&b"cycle_length=%7B%7B&age=&StressScore=%7D%7D"[..]), &st));
        assert!(html.contains("Usia harus diisi"));
        for rule in RULES.iter() {
            assert!(html.contains(&format!(r#"name="{}""#, rule.field.key())), "{}", rule.field.key());
        }
        assert!(html.contains(r#"value="&#123;&#123;""#));
        assert!(html.contains(r#"value="&#125;&#125;""#));
    }

    #[test]
    fn unavailable_model_ignores_body() {
        let st = AppState::new(FormHandler::unavailable());
        let html = body_string(handle_post(Err(BodyError::TooLarge), &st));
        assert!(html.contains("Sistem prediksi tidak tersedia. Mohon coba lagi nanti."));
        let html = body_string(handle_get(&st));
        assert!(html.contains("Sistem prediksi tidak tersedia."));
    }

    #[test]
    fn unreadable_body_is_generic_failure() {
        let st = state(Prediction::new(0, 87.3));
        let html = body_string(handle_post(Err(BodyError::TooLarge), &st));
        assert!(html.contains("Terjadi kesalahan sistem saat memproses input Anda."));

        let html = body_string(handle_post(Ok(&[0xff, 0xfe][..]), &st));
        assert!(html.contains("Terjadi kesalahan sistem"));
    }
}
