use crate::domain::model::{Appointment, Earnings, ItemKind, ReportRow, TransactionItem};
use crate::utils::error::{Result, SalonError};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const DEFAULT_REPORT_DAYS: i64 = 7;

/// An appointment with the records the report joins onto it.
#[derive(Debug, Clone)]
pub struct AppointmentLine {
    pub appointment: Appointment,
    pub client_name: Option<String>,
    pub items: Vec<TransactionItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportWindow {
    /// Midnight of `date` through midnight `days` later, both ends inclusive.
    pub fn starting(date: NaiveDate, days: i64) -> Self {
        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        Self {
            start,
            end: start + Duration::days(days),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

pub fn parse_report_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| {
        SalonError::DateParseError {
            input: input.to_string(),
            source,
        }
    })
}

/// Sale lines for the window. Taxed items carry the salon's tax.
pub fn build_report(lines: &[AppointmentLine], tax_rate: f64, window: ReportWindow) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = lines
        .iter()
        .filter(|line| window.contains(line.appointment.start_time))
        .filter_map(|line| line.client_name.as_ref().map(|name| (line, name)))
        .flat_map(|(line, client_name)| {
            line.items.iter().map(move |item| ReportRow {
                start_time: line.appointment.start_time,
                client_name: client_name.clone(),
                item_label: item.label.clone(),
                price: if item.is_taxed {
                    item.price * (tax_rate + 1.0)
                } else {
                    item.price
                },
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.client_name.cmp(&b.client_name))
            .then_with(|| a.item_label.cmp(&b.item_label))
    });
    rows
}

/// Pre-tax service and product totals for non-cancelled appointments on
/// `start..=end`.
pub fn earnings(lines: &[AppointmentLine], start: NaiveDate, end: NaiveDate) -> Earnings {
    lines
        .iter()
        .filter(|line| !line.appointment.is_cancelled)
        .filter(|line| {
            let day = line.appointment.start_time.date();
            day >= start && day <= end
        })
        .flat_map(|line| line.items.iter())
        .fold(Earnings::default(), |mut acc, item| {
            match item.kind {
                ItemKind::Service => acc.services += item.price,
                ItemKind::Product => acc.products += item.price,
            }
            acc
        })
}

pub fn report_to_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SalonError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SalonError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn item(appointment_id: i64, label: &str, price: f64, is_taxed: bool, kind: ItemKind) -> TransactionItem {
        TransactionItem {
            appointment_id,
            label: label.to_string(),
            price,
            is_taxed,
            kind,
        }
    }

    fn line(id: i64, start: NaiveDateTime, client: Option<&str>, items: Vec<TransactionItem>) -> AppointmentLine {
        AppointmentLine {
            appointment: Appointment {
                id,
                stylist_id: 1,
                client_id: id,
                start_time: start,
                is_cancelled: false,
            },
            client_name: client.map(str::to_string),
            items,
        }
    }

    #[test]
    fn test_report_applies_tax_and_orders_rows() {
        let lines = vec![
            line(2, at(4, 10), Some("Zoe"), vec![item(2, "Cut", 30.0, false, ItemKind::Service)]),
            line(
                1,
                at(4, 9),
                Some("Adam"),
                vec![
                    item(1, "Shampoo", 10.0, true, ItemKind::Product),
                    item(1, "Color", 80.0, false, ItemKind::Service),
                ],
            ),
        ];

        let rows = build_report(&lines, 0.5, ReportWindow::starting(at(1, 0).date(), 7));
        let labels: Vec<&str> = rows.iter().map(|r| r.item_label.as_str()).collect();
        assert_eq!(labels, vec!["Color", "Shampoo", "Cut"]);
        assert_eq!(rows[1].price, 15.0);
        assert_eq!(rows[0].client_name, "Adam");
    }

    #[test]
    fn test_report_window_and_missing_clients() {
        let lines = vec![
            line(1, at(8, 0), Some("Edge"), vec![item(1, "Cut", 20.0, false, ItemKind::Service)]),
            line(2, at(8, 1), Some("Late"), vec![item(2, "Cut", 20.0, false, ItemKind::Service)]),
            line(3, at(2, 9), None, vec![item(3, "Cut", 20.0, false, ItemKind::Service)]),
        ];

        let rows = build_report(&lines, 0.0, ReportWindow::starting(at(1, 0).date(), 7));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_name, "Edge");
    }

    #[test]
    fn test_earnings_split_by_kind_and_skip_cancelled() {
        let mut cancelled = line(3, at(5, 9), Some("C"), vec![item(3, "Cut", 99.0, false, ItemKind::Service)]);
        cancelled.appointment.is_cancelled = true;
        let lines = vec![
            line(1, at(5, 9), Some("A"), vec![item(1, "Cut", 40.0, true, ItemKind::Service)]),
            line(2, at(6, 9), Some("B"), vec![item(2, "Gel", 12.5, false, ItemKind::Product)]),
            line(4, at(20, 9), Some("D"), vec![item(4, "Cut", 40.0, false, ItemKind::Service)]),
            cancelled,
        ];

        let totals = earnings(&lines, at(1, 0).date(), at(10, 0).date());
        assert_eq!(totals.services, 40.0);
        assert_eq!(totals.products, 12.5);
    }

    #[test]
    fn test_parse_report_date() {
        assert_eq!(parse_report_date("2024-03-01").unwrap(), at(1, 0).date());
        assert!(matches!(
            parse_report_date("03/01/2024"),
            Err(SalonError::DateParseError { .. })
        ));
    }

    #[test]
    fn test_report_csv_has_header() {
        let rows = vec![ReportRow {
            start_time: at(4, 9),
            client_name: "Adam".to_string(),
            item_label: "Color".to_string(),
            price: 80.0,
        }];
        let csv = report_to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("start_time,client_name,item_label,price"));
        assert!(lines.next().unwrap().contains("Adam,Color,80"));
    }
}
