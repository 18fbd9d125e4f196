use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type SalonId = i64;
pub type StylistId = i64;
pub type UserId = i64;
pub type ServiceId = i64;
pub type ClientId = i64;
pub type AppointmentId = i64;
pub type EmploymentTypeId = i64;

pub const RECEPTIONIST_ROLE: &str = "RECEPTIONIST";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salon {
    pub id: SalonId,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylist {
    /// `None` until the record has been persisted.
    pub id: Option<StylistId>,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    pub salon_id: Option<SalonId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub employment_type_id: Option<EmploymentTypeId>,
    #[serde(default)]
    pub manual_order_index: Option<i64>,
    #[serde(default)]
    pub cached_order_index: i64,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub service_commission_rate: Option<f64>,
    #[serde(default)]
    pub retail_commission_rate: Option<f64>,
    /// Set while the roster re-saves the rest of a salon, so those saves do not cascade.
    #[serde(skip)]
    pub skip_saving_other_stylists: bool,
}

impl Stylist {
    pub fn new(name: impl Into<String>, salon_id: SalonId) -> Self {
        Self {
            id: None,
            name: name.into(),
            active: true,
            salon_id: Some(salon_id),
            user_id: None,
            employment_type_id: None,
            manual_order_index: None,
            cached_order_index: 0,
            rent: None,
            service_commission_rate: None,
            retail_commission_rate: None,
            skip_saving_other_stylists: false,
        }
    }

    /// Placeholder used by calendar filters to mean every stylist.
    pub fn everyone() -> Self {
        Self {
            id: Some(0),
            salon_id: None,
            ..Self::new("All Stylists", 0)
        }
    }

    pub fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    pub fn clean_values(&mut self) {
        self.rent.get_or_insert(0.0);
        self.service_commission_rate.get_or_insert(0.0);
        self.retail_commission_rate.get_or_insert(0.0);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub role_codes: Vec<String>,
}

impl User {
    pub fn has_role(&self, code: &str) -> bool {
        self.role_codes.iter().any(|c| c == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentType {
    pub id: EmploymentTypeId,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<ServiceId>,
    pub salon_id: SalonId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylistService {
    pub stylist_id: StylistId,
    pub service_id: ServiceId,
    pub length_in_minutes: Option<u32>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPayment {
    pub id: Option<i64>,
    pub stylist_id: StylistId,
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub stylist_id: StylistId,
    pub client_id: ClientId,
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub is_cancelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Service,
    Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub appointment_id: AppointmentId,
    pub label: String,
    pub price: f64,
    #[serde(default)]
    pub is_taxed: bool,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub start_time: NaiveDateTime,
    pub client_name: String,
    pub item_label: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Earnings {
    pub services: f64,
    pub products: f64,
}

fn default_true() -> bool {
    true
}
