use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::{
    city::City,
    error::InputError,
    handlers::AppState,
    input::AreaInputs,
    page::{render_page, Outcome, PageView},
};

/// Fields posted by the prediction form
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(flatten)]
    pub area: AreaInputs,
    #[serde(default)]
    pub city: Option<String>,
}

/// Handle GET / with the blank form
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let view = PageView::initial(
        state.banner.as_deref(),
        state.estimator.model_state().load_error(),
    );
    Html(render_page(&view))
}

/// Handle POST /predict
///
/// Always answers with the full page; failures are rendered as messages
/// next to the form rather than as HTTP errors.
pub async fn submit_form(
    State(state): State<AppState>,
    payload: Result<Form<PredictForm>, FormRejection>,
) -> Html<String> {
    let mut view = PageView::initial(
        state.banner.as_deref(),
        state.estimator.model_state().load_error(),
    );

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected form submission");
            view.outcome = Some(Outcome::InvalidInput(InputError::InvalidBody(
                rejection.body_text(),
            )));
            return Html(render_page(&view));
        }
    };

    if let Some(slider) = &form.area.area_slider {
        view.slider_value = slider.clone();
    }
    if let Some(manual) = &form.area.area_manual {
        view.manual_value = manual.clone();
    }

    let outcome = evaluate(&state, &form, &mut view.city);
    tracing::info!(
        city = %view.city,
        success = matches!(outcome, Outcome::Success(_)),
        "Handled form submission"
    );
    view.outcome = Some(outcome);

    Html(render_page(&view))
}

fn evaluate(state: &AppState, form: &PredictForm, city_slot: &mut City) -> Outcome {
    let city = match form.city.as_deref() {
        None => City::default(),
        Some(name) => match name.parse::<City>() {
            Ok(city) => city,
            Err(err) => return Outcome::InvalidInput(err),
        },
    };
    *city_slot = city;

    let area = match form.area.resolve(state.config.input.precedence) {
        Ok(area) => area,
        Err(err) => return Outcome::InvalidInput(err),
    };

    match state.estimator.estimate(area, city) {
        Ok(estimate) => Outcome::Success(estimate),
        Err(err) => Outcome::PredictionFailed(err),
    }
}
