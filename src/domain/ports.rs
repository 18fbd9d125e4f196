use crate::domain::model::{
    Appointment, Client, ClientId, EmploymentType, EmploymentTypeId, RentPayment, Salon, SalonId,
    Service, Stylist, StylistId, StylistService, TransactionItem, User, UserId,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Salon-wide ordering facts the position calculator reads.
pub trait SalonDirectory {
    fn highest_manual_order_index(&self) -> i64;
    /// Names of active, non-receptionist stylists in current calendar order.
    fn ordered_stylist_names(&self) -> Vec<String>;
    fn has_manual_order(&self) -> bool;
}

impl<D: SalonDirectory + ?Sized> SalonDirectory for &D {
    fn highest_manual_order_index(&self) -> i64 {
        (**self).highest_manual_order_index()
    }

    fn ordered_stylist_names(&self) -> Vec<String> {
        (**self).ordered_stylist_names()
    }

    fn has_manual_order(&self) -> bool {
        (**self).has_manual_order()
    }
}

#[async_trait]
pub trait StylistStore: Send + Sync {
    async fn salon(&self, id: SalonId) -> Result<Option<Salon>>;
    async fn stylist(&self, id: StylistId) -> Result<Option<Stylist>>;
    async fn stylists_in_salon(&self, salon_id: SalonId) -> Result<Vec<Stylist>>;
    async fn find_stylist_by_name(&self, salon_id: SalonId, name: &str) -> Result<Option<Stylist>>;
    /// Persists a new stylist and returns it with its assigned id.
    async fn insert_stylist(&self, stylist: Stylist) -> Result<Stylist>;
    async fn update_stylist(&self, stylist: &Stylist) -> Result<()>;

    async fn user(&self, id: UserId) -> Result<Option<User>>;
    async fn employment_type(&self, id: EmploymentTypeId) -> Result<Option<EmploymentType>>;

    async fn active_services(&self, salon_id: SalonId) -> Result<Vec<Service>>;
    async fn insert_service(&self, service: Service) -> Result<Service>;
    async fn stylist_services(&self, stylist_id: StylistId) -> Result<Vec<StylistService>>;
    async fn delete_stylist_services(&self, stylist_id: StylistId) -> Result<()>;
    async fn insert_stylist_service(&self, service: StylistService) -> Result<()>;

    async fn insert_rent_payment(&self, payment: RentPayment) -> Result<RentPayment>;
    async fn rent_payments(&self, stylist_id: StylistId) -> Result<Vec<RentPayment>>;

    async fn appointments_for_stylist(&self, stylist_id: StylistId) -> Result<Vec<Appointment>>;
    async fn client(&self, id: ClientId) -> Result<Option<Client>>;
    async fn transaction_items(&self, appointment_id: i64) -> Result<Vec<TransactionItem>>;
}
