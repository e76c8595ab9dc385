use area_price_predictor::city::City;
use colored::Colorize;

/// Execute the cities command
pub fn execute() {
    println!("{}", "Supported Cities:".green().bold());
    println!();
    for line in city_table() {
        println!("{}", line);
    }
}

fn city_table() -> Vec<String> {
    let mut lines = vec![format!("  {:<10} {:>6}  {}", "City", "Factor", "Info")];
    lines.extend(City::ALL.iter().map(|city| {
        format!("  {:<10} {:>6.2}  {}", city.as_str(), city.factor(), city.info())
    }));
    lines
}
