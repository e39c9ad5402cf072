//! Framework-free handling of the prediction form.
//!
//! `FormHandler` owns the (optional) predictor and turns a parsed submission
//! into a `FormOutcome`; the web binary only maps outcomes to HTML.

use std::sync::Arc;

use log::{debug, error, info};

use crate::features::assemble;
use crate::model::{Prediction, Predictor};
use crate::present::{build_display, DisplayBundle};
use crate::validation::{validate, ValidationErrors};

pub const UNAVAILABLE_MESSAGE: &str = "Sistem prediksi tidak tersedia. Mohon coba lagi nanti.";
pub const FAILURE_MESSAGE: &str =
    "Terjadi kesalahan sistem saat memproses input Anda. Silakan coba lagi.";

/// What the result page needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub prediction: Prediction,
    pub display:    DisplayBundle,
}

impl ResultView {
    pub fn label(&self) -> &'static str {
        self.prediction.label()
    }

    pub fn probability(&self) -> f64 {
        self.prediction.confidence
    }

    pub fn css_class(&self) -> &'static str {
        self.display.severity.css_class()
    }
}

/// The page to render for one request to `/form`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// GET: blank form.
    Empty,
    /// Form again, with the field messages in a banner.
    Invalid(ValidationErrors),
    /// No model loaded; validation was skipped.
    Unavailable,
    /// Something unexpected failed after validation; details are only logged.
    Failed,
    Result(ResultView),
}

impl FormOutcome {
    /// Text for the form's error banner, if any.
    pub fn banner(&self) -> Option<String> {
        match self {
            FormOutcome::Invalid(errors) => Some(errors.join("<br>")),
            FormOutcome::Unavailable     => Some(UNAVAILABLE_MESSAGE.to_owned()),
            FormOutcome::Failed          => Some(FAILURE_MESSAGE.to_owned()),
            FormOutcome::Empty | FormOutcome::Result(_) => None,
        }
    }
}

/// Per-process form handler. Cheap to share: wrap it in an `Arc`.
pub struct FormHandler {
    predictor: Option<Arc<dyn Predictor>>,
}

impl FormHandler {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        FormHandler { predictor: Some(predictor) }
    }

    /// A handler whose every request reports the service as unavailable.
    pub fn unavailable() -> Self {
        FormHandler { predictor: None }
    }

    pub fn is_available(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn handle_get(&self) -> FormOutcome {
        match self.predictor {
            Some(_) => FormOutcome::Empty,
            None => {
                error!("form requested but no model is loaded");
                FormOutcome::Unavailable
            }
        }
    }

    pub fn handle_post(&self, form: &[(String, String)]) -> FormOutcome {
        let predictor = match &self.predictor {
            Some(p) => p,
            None => {
                error!("form submitted but no model is loaded");
                return FormOutcome::Unavailable;
            }
        };

        let input = match validate(form) {
            Ok(input) => input,
            Err(errors) => {
                info!("rejected submission with {} validation error(s)", errors.len());
                return FormOutcome::Invalid(errors);
            }
        };
        info!("valid submission received");
        debug!("validated input: {:?}", input);

        let features = assemble(&input);
        match predictor.predict(&features) {
            Ok(prediction) => {
                info!(
                    "predicted '{}' (class {}) at {:.1}%",
                    prediction.label(),
                    prediction.class_index,
                    prediction.confidence
                );
                let display = build_display(&input, &prediction);
                FormOutcome::Result(ResultView { prediction, display })
            }
            Err(e) => {
                error!(
                    "error while processing form submission: {} (features {:?})",
                    e,
                    features.as_slice()
                );
                FormOutcome::Failed
            }
        }
    }
}
