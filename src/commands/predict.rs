use anyhow::Result;
use area_price_predictor::{
    city::City,
    config::Config,
    estimator::PriceEstimator,
    input::Area,
    model::ModelState,
};
use colored::Colorize;

/// Execute the predict command
///
/// Loads the model, estimates one price and prints it. Any failure,
/// including a missing model, is returned as an error.
pub fn execute(cfg: &Config, area: f64, city: &str) -> Result<()> {
    let city: City = city.parse()?;
    let area = Area::new(area)?;

    let estimator = PriceEstimator::new(ModelState::load_from(&cfg.model.path));
    let estimate = estimator.estimate(area, city)?;

    println!("✨ {}", estimate.to_string().green().bold());
    println!(
        "  {}: {:.2}  {}: {}",
        "Base price".cyan(),
        estimate.base_price,
        "City factor".cyan(),
        estimate.factor
    );

    Ok(())
}
