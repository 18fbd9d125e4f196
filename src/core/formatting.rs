use crate::domain::model::Stylist;

/// Two-decimal rendering for positive amounts; zero, negative and unset render blank.
pub fn with_precision(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("{:.2}", v),
        _ => String::new(),
    }
}

pub fn formatted_rent(stylist: &Stylist) -> String {
    with_precision(stylist.rent)
}

pub fn formatted_service_commission_rate(stylist: &Stylist) -> String {
    with_precision(stylist.service_commission_rate)
}

pub fn formatted_retail_commission_rate(stylist: &Stylist) -> String {
    with_precision(stylist.retail_commission_rate)
}
