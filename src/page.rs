//! Server-rendered HTML for the prediction form

use std::fmt::Write as _;

use crate::{
    banner::Banner,
    city::City,
    error::{InputError, ModelLoadError, PredictionError},
    estimator::Estimate,
    input::{AREA_STEP, DEFAULT_AREA, MANUAL_FIELD, MAX_AREA, MIN_AREA, SLIDER_FIELD},
};

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", sans-serif; margin: 0; display: flex; color: #333333; }
aside { width: 300px; min-height: 100vh; background: #f0f2f6; padding: 24px; box-sizing: border-box; }
main { flex: 1; padding: 24px 48px; }
.header-style { font-size: 50px; color: #4CAF50; text-align: center; font-weight: bold; }
.subheader-style { font-size: 20px; color: #333333; text-align: center; font-weight: 300; margin-top: -10px; }
.banner img { width: 100%; }
.banner figcaption { text-align: center; color: grey; font-size: 14px; }
button { background-color: #4CAF50; color: white; border: none; border-radius: 12px; padding: 10px 20px; cursor: pointer; }
button:hover { background-color: #45a049; }
.info, .success, .error, .warning { padding: 12px 16px; border-radius: 8px; margin: 12px 0; }
.info { background: #e8f0fe; }
.success { background: #e6f4ea; color: #1e6631; }
.error { background: #fdecea; color: #8a1c1c; }
.warning { background: #fff8e1; color: #7a5b00; }
.footer-style { text-align: center; font-size: 14px; color: grey; margin-top: 20px; }
"#;

/// Result of a form submission
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(Estimate),
    PredictionFailed(PredictionError),
    InvalidInput(InputError),
}

/// Everything the page needs for one render
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub banner: Option<&'a Banner>,
    pub model_error: Option<&'a ModelLoadError>,
    pub city: City,
    pub slider_value: String,
    pub manual_value: String,
    pub outcome: Option<Outcome>,
}

impl<'a> PageView<'a> {
    /// Fresh form with default inputs and no outcome
    pub fn initial(banner: Option<&'a Banner>, model_error: Option<&'a ModelLoadError>) -> Self {
        Self {
            banner,
            model_error,
            city: City::default(),
            slider_value: DEFAULT_AREA.to_string(),
            manual_value: DEFAULT_AREA.to_string(),
            outcome: None,
        }
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Area-Price Predictor</title>\n");
    html.push_str("<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🏠</text></svg>\">\n");
    let _ = write!(html, "<style>{}</style>\n</head>\n<body>\n", STYLE);

    html.push_str("<form method=\"post\" action=\"/predict\" style=\"display:contents\">\n");
    render_sidebar(&mut html, view.city);
    html.push_str("<main>\n");
    render_header(&mut html, view);
    render_area_inputs(&mut html, &view.slider_value, &view.manual_value);

    html.push_str("<hr>\n<h3>🔮 Predict the Property Price</h3>\n");
    html.push_str("<button type=\"submit\">💰 Show Predicted Price</button>\n");
    if let Some(outcome) = &view.outcome {
        render_outcome(&mut html, outcome);
    }
    html.push_str("<hr>\n");
    render_footer(&mut html);
    html.push_str("</main>\n</form>\n</body>\n</html>\n");

    html
}

fn render_header(html: &mut String, view: &PageView<'_>) {
    html.push_str("<div class=\"header-style\">🏡 Area-Price Prediction App</div>\n");
    html.push_str(
        "<div class=\"subheader-style\">Powered by Machine Learning | Indian Property Market</div>\n",
    );

    if let Some(banner) = view.banner {
        let _ = write!(
            html,
            "<figure class=\"banner\"><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
            banner.data_url(),
            escape_html(&banner.caption),
            escape_html(&banner.caption)
        );
    }

    if let Some(err) = view.model_error {
        let _ = write!(
            html,
            "<div class=\"error\">Model loading failed: {}</div>\n",
            escape_html(&err.to_string())
        );
    }
}

fn render_sidebar(html: &mut String, selected: City) {
    html.push_str("<aside>\n");
    html.push_str("<h2>📋 <em>App Features</em></h2>\n<ul>\n");
    html.push_str("<li>Predict property prices based on area.</li>\n");
    html.push_str("<li>Adjust prices dynamically based on location.</li>\n");
    html.push_str("<li>Interactive and user-friendly interface.</li>\n</ul>\n");
    html.push_str("<h2>📊 <em>Model Info</em></h2>\n<ul>\n");
    html.push_str("<li>Linear Regression Model.</li>\n");
    html.push_str("<li>Location-based price adjustments.</li>\n");
    html.push_str("<li>Predefined Indian city multipliers.</li>\n</ul>\n");

    html.push_str("<h3>📍 Select a Location</h3>\n");
    html.push_str("<fieldset title=\"Select a city to adjust prices based on location-specific factors.\">\n");
    html.push_str("<legend>Choose a city:</legend>\n");
    for city in City::ALL {
        let _ = write!(
            html,
            "<label title=\"{info}\"><input type=\"radio\" name=\"city\" value=\"{name}\"{checked}> {name}</label><br>\n",
            info = escape_html(city.info()),
            name = city.as_str(),
            checked = if city == selected { " checked" } else { "" },
        );
    }
    html.push_str("</fieldset>\n");
    let _ = write!(html, "<div class=\"info\">{}</div>\n", escape_html(selected.info()));
    html.push_str("</aside>\n");
}

fn render_area_inputs(html: &mut String, slider_value: &str, manual_value: &str) {
    html.push_str("<h3>📏 Enter the Area (in square feet)</h3>\n");
    let _ = write!(
        html,
        "<label for=\"{slider}\">Move the slider to specify the area of the property (sqft):</label><br>\n\
         <input type=\"range\" id=\"{slider}\" name=\"{slider}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value=this.value\"> <output>{value}</output><br>\n",
        slider = SLIDER_FIELD,
        min = MIN_AREA,
        max = MAX_AREA,
        step = AREA_STEP,
        value = escape_html(slider_value),
    );
    let _ = write!(
        html,
        "<label for=\"{manual}\">Or enter the area manually:</label><br>\n\
         <input type=\"number\" id=\"{manual}\" name=\"{manual}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         title=\"Enter the area in square feet.\"><br>\n",
        manual = MANUAL_FIELD,
        min = MIN_AREA,
        max = MAX_AREA,
        step = AREA_STEP,
        value = escape_html(manual_value),
    );
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Success(estimate) => {
            let _ = write!(
                html,
                "<div class=\"success\">✨ <em>Predicted Price</em>: {} for {} sqft in {}</div>\n",
                escape_html(&estimate.formatted_price()),
                estimate.area,
                estimate.city
            );
        }
        Outcome::PredictionFailed(err) => {
            let _ = write!(
                html,
                "<div class=\"error\">Oops! Something went wrong: {}</div>\n",
                escape_html(&err.to_string())
            );
        }
        Outcome::InvalidInput(err) => {
            let _ = write!(
                html,
                "<div class=\"warning\">Please enter a valid area: {}</div>\n",
                escape_html(&err.to_string())
            );
        }
    }
}

fn render_footer(html: &mut String) {
    html.push_str("<div class=\"footer-style\">\n");
    html.push_str("<p>Created by <a href=\"https://www.linkedin.com/in/revangunaganti\" target=\"_blank\">🔗LinkedIn</a> | \n");
    html.push_str("<a href=\"https://github.com/Revan87013\" target=\"_blank\">🐱GitHub</a></p>\n");
    html.push_str("<p>&copy; 2024 All Rights Reserved</p>\n</div>\n");
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Area;
    use std::path::PathBuf;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_initial_page_has_form_controls() {
        let html = render_page(&PageView::initial(None, None));
        assert!(html.contains("Area-Price Prediction App"));
        assert!(html.contains("name=\"area_slider\" min=\"500\" max=\"10000\" step=\"50\" value=\"1000\""));
        assert!(html.contains("name=\"area_manual\" min=\"500\" max=\"10000\" step=\"50\" value=\"1000\""));
        assert!(html.contains("value=\"Mumbai\" checked"));
        assert_eq!(html.matches("type=\"radio\"").count(), 8);
        assert!(!html.contains("class=\"success\""));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn test_success_outcome() {
        let mut view = PageView::initial(None, None);
        view.city = City::Chennai;
        view.outcome = Some(Outcome::Success(Estimate {
            area: Area::new(1_000.0).unwrap(),
            city: City::Chennai,
            base_price: 100.0,
            factor: 1.0,
            price: 100.0,
        }));

        let html = render_page(&view);
        assert!(html.contains("₹100.00 for 1000 sqft in Chennai"));
        assert!(html.contains("Steady property prices."));
    }

    #[test]
    fn test_model_error_is_shown() {
        let err = ModelLoadError::Invalid {
            path: PathBuf::from("area_price_model.json"),
            reason: "<bad>".to_string(),
        };
        let html = render_page(&PageView::initial(None, Some(&err)));
        assert!(html.contains("Model loading failed"));
        assert!(html.contains("&lt;bad&gt;"));
    }

    #[test]
    fn test_banner_is_embedded() {
        let banner = Banner {
            mime_type: "image/png".to_string(),
            base64_data: "AAAA".to_string(),
            caption: "Property Price Prediction".to_string(),
        };
        let html = render_page(&PageView::initial(Some(&banner), None));
        assert!(html.contains("src=\"data:image/png;base64,AAAA\""));
        assert!(html.contains("<figcaption>Property Price Prediction</figcaption>"));
    }
}
