use crate::domain::model::{
    Appointment, Client, ClientId, EmploymentType, EmploymentTypeId, RentPayment, Salon, SalonId,
    Service, Stylist, StylistId, StylistService, TransactionItem, User, UserId,
};
use crate::domain::ports::StylistStore;
use crate::utils::error::{Result, SalonError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

/// Every table the store keeps; also the on-disk JSON layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub salons: Vec<Salon>,
    pub stylists: Vec<Stylist>,
    pub users: Vec<User>,
    pub employment_types: Vec<EmploymentType>,
    pub services: Vec<Service>,
    pub stylist_services: Vec<StylistService>,
    pub rent_payments: Vec<RentPayment>,
    pub clients: Vec<Client>,
    pub appointments: Vec<Appointment>,
    pub transaction_items: Vec<TransactionItem>,
}

/// 下一個可用 id (目前最大值 + 1)
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self::from_data(serde_json::from_str(content)?))
    }

    /// 從 JSON 檔案載入資料
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        tracing::debug!("Loaded store from {}", path.as_ref().display());
        Self::from_json(&content)
    }

    /// 將資料寫回 JSON 檔案，必要時建立上層目錄
    pub async fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let full_path = path.as_ref();
        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = self.data.read().await;
        fs::write(full_path, serde_json::to_string_pretty(&*data)?)?;
        tracing::debug!("Saved store to {}", full_path.display());
        Ok(())
    }

    pub async fn add_salon(&self, salon: Salon) {
        self.data.write().await.salons.push(salon);
    }

    pub async fn add_user(&self, user: User) {
        self.data.write().await.users.push(user);
    }

    pub async fn add_client(&self, client: Client) {
        self.data.write().await.clients.push(client);
    }

    pub async fn add_appointment(&self, appointment: Appointment, items: Vec<TransactionItem>) {
        let mut data = self.data.write().await;
        data.appointments.push(appointment);
        data.transaction_items.extend(items);
    }

    pub async fn add_employment_type(&self, employment_type: EmploymentType) {
        self.data.write().await.employment_types.push(employment_type);
    }
}

#[async_trait]
impl StylistStore for InMemoryStore {
    async fn salon(&self, id: SalonId) -> Result<Option<Salon>> {
        let data = self.data.read().await;
        Ok(data.salons.iter().find(|s| s.id == id).cloned())
    }

    async fn stylist(&self, id: StylistId) -> Result<Option<Stylist>> {
        let data = self.data.read().await;
        Ok(data.stylists.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn stylists_in_salon(&self, salon_id: SalonId) -> Result<Vec<Stylist>> {
        let data = self.data.read().await;
        let mut stylists: Vec<Stylist> = data
            .stylists
            .iter()
            .filter(|s| s.salon_id == Some(salon_id))
            .cloned()
            .collect();
        stylists.sort_by_key(|s| s.id);
        Ok(stylists)
    }

    async fn find_stylist_by_name(&self, salon_id: SalonId, name: &str) -> Result<Option<Stylist>> {
        let data = self.data.read().await;
        Ok(data
            .stylists
            .iter()
            .find(|s| s.salon_id == Some(salon_id) && s.name == name)
            .cloned())
    }

    async fn insert_stylist(&self, mut stylist: Stylist) -> Result<Stylist> {
        let mut data = self.data.write().await;
        stylist.id = Some(next_id(data.stylists.iter().filter_map(|s| s.id)));
        data.stylists.push(stylist.clone());
        Ok(stylist)
    }

    async fn update_stylist(&self, stylist: &Stylist) -> Result<()> {
        let id = stylist.id.ok_or_else(|| SalonError::validation("id", "stylist has not been saved"))?;
        let mut data = self.data.write().await;
        let slot = data
            .stylists
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(SalonError::NotFound {
                entity: "stylist",
                id,
            })?;
        *slot = stylist.clone();
        Ok(())
    }

    async fn user(&self, id: UserId) -> Result<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn employment_type(&self, id: EmploymentTypeId) -> Result<Option<EmploymentType>> {
        let data = self.data.read().await;
        Ok(data.employment_types.iter().find(|t| t.id == id).cloned())
    }

    async fn active_services(&self, salon_id: SalonId) -> Result<Vec<Service>> {
        let data = self.data.read().await;
        let mut services: Vec<Service> = data
            .services
            .iter()
            .filter(|s| s.salon_id == salon_id && s.active)
            .cloned()
            .collect();
        services.sort_by_key(|s| s.id);
        Ok(services)
    }

    async fn insert_service(&self, mut service: Service) -> Result<Service> {
        let mut data = self.data.write().await;
        service.id = Some(next_id(data.services.iter().filter_map(|s| s.id)));
        data.services.push(service.clone());
        Ok(service)
    }

    async fn stylist_services(&self, stylist_id: StylistId) -> Result<Vec<StylistService>> {
        let data = self.data.read().await;
        Ok(data
            .stylist_services
            .iter()
            .filter(|ss| ss.stylist_id == stylist_id)
            .cloned()
            .collect())
    }

    async fn delete_stylist_services(&self, stylist_id: StylistId) -> Result<()> {
        let mut data = self.data.write().await;
        data.stylist_services.retain(|ss| ss.stylist_id != stylist_id);
        Ok(())
    }

    async fn insert_stylist_service(&self, service: StylistService) -> Result<()> {
        self.data.write().await.stylist_services.push(service);
        Ok(())
    }

    async fn insert_rent_payment(&self, mut payment: RentPayment) -> Result<RentPayment> {
        let mut data = self.data.write().await;
        payment.id = Some(next_id(data.rent_payments.iter().filter_map(|p| p.id)));
        data.rent_payments.push(payment.clone());
        Ok(payment)
    }

    async fn rent_payments(&self, stylist_id: StylistId) -> Result<Vec<RentPayment>> {
        let data = self.data.read().await;
        Ok(data
            .rent_payments
            .iter()
            .filter(|p| p.stylist_id == stylist_id)
            .cloned()
            .collect())
    }

    async fn appointments_for_stylist(&self, stylist_id: StylistId) -> Result<Vec<Appointment>> {
        let data = self.data.read().await;
        Ok(data
            .appointments
            .iter()
            .filter(|a| a.stylist_id == stylist_id)
            .cloned()
            .collect())
    }

    async fn client(&self, id: ClientId) -> Result<Option<Client>> {
        let data = self.data.read().await;
        Ok(data.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn transaction_items(&self, appointment_id: i64) -> Result<Vec<TransactionItem>> {
        let data = self.data.read().await;
        Ok(data
            .transaction_items
            .iter()
            .filter(|t| t.appointment_id == appointment_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryStore::new();
        let first = store.insert_stylist(Stylist::new("Alice", 1)).await.unwrap();
        let second = store.insert_stylist(Stylist::new("Bob", 1)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.stylists_in_salon(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_stylist_is_not_found() {
        let store = InMemoryStore::new();
        let mut ghost = Stylist::new("Ghost", 1);
        ghost.id = Some(42);

        let result = store.update_stylist(&ghost).await;
        assert!(matches!(result, Err(SalonError::NotFound { id: 42, .. })));
    }

    #[tokio::test]
    async fn test_find_by_name_is_scoped_to_salon() {
        let store = InMemoryStore::new();
        store.insert_stylist(Stylist::new("Alice", 1)).await.unwrap();

        assert!(store.find_stylist_by_name(1, "Alice").await.unwrap().is_some());
        assert!(store.find_stylist_by_name(2, "Alice").await.unwrap().is_none());
        assert!(store.find_stylist_by_name(1, "alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("salon.json");

        let store = InMemoryStore::new();
        store
            .add_salon(Salon {
                id: 1,
                name: "Main Street".to_string(),
                active: true,
                tax_rate: 0.08,
            })
            .await;
        store.insert_stylist(Stylist::new("Alice", 1)).await.unwrap();
        store.save_to(&path).await.unwrap();

        let reloaded = InMemoryStore::load(&path).unwrap();
        assert_eq!(reloaded.salon(1).await.unwrap().unwrap().name, "Main Street");
        assert_eq!(reloaded.stylist(1).await.unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let store = InMemoryStore::from_json(r#"{"salons": [{"id": 3, "name": "Uptown"}]}"#).unwrap();
        let data = store.data.try_read().unwrap();
        assert_eq!(data.salons[0].tax_rate, 0.0);
        assert!(data.salons[0].active);
        assert!(data.stylists.is_empty());
    }
}
