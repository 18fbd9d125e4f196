use crate::core::directory::SalonSnapshot;
use crate::core::ordering::OrderCalculator;
use crate::core::report::{self, AppointmentLine, ReportWindow, DEFAULT_REPORT_DAYS};
use crate::domain::model::{
    Client, Earnings, ReportRow, RentPayment, Salon, SalonId, Service, Stylist, StylistId,
    StylistService, RECEPTIONIST_ROLE,
};
use crate::domain::ports::{SalonDirectory, StylistStore};
use crate::utils::error::{Result, SalonError};
use crate::utils::validation::{form_decimal, form_integer};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// 排班設定：排除於行事曆外的角色，以及報表涵蓋天數
#[derive(Debug, Clone)]
pub struct RosterSettings {
    pub receptionist_role: String,
    pub report_days: i64,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            receptionist_role: RECEPTIONIST_ROLE.to_string(),
            report_days: DEFAULT_REPORT_DAYS,
        }
    }
}

/// Stylist record lifecycle on top of a [`StylistStore`].
pub struct StylistRoster<S: StylistStore> {
    store: S,
    settings: RosterSettings,
}

impl<S: StylistStore> StylistRoster<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, RosterSettings::default())
    }

    pub fn with_settings(store: S, settings: RosterSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 載入沙龍目前所有美髮師的快照
    async fn snapshot(&self, salon_id: SalonId) -> Result<SalonSnapshot> {
        SalonSnapshot::load(&self.store, salon_id, &self.settings.receptionist_role).await
    }

    /// 取得美髮師所屬沙龍，未指定或不存在時回傳 MissingSalon
    async fn salon_of(&self, stylist: &Stylist) -> Result<Salon> {
        let salon_id = stylist.salon_id.ok_or(SalonError::MissingSalon)?;
        self.store
            .salon(salon_id)
            .await?
            .ok_or(SalonError::MissingSalon)
    }

    /// Calendar position the stylist would get if saved now.
    pub async fn position(&self, stylist: &Stylist) -> Result<i64> {
        let salon = self.salon_of(stylist).await?;
        let snapshot = self.snapshot(salon.id).await?;
        OrderCalculator::new(stylist, Some(&snapshot))?.order_index()
    }

    /// 儲存前驗證：名稱不可空白、必須屬於沙龍、同沙龍內名稱不可重複
    async fn validate(&self, stylist: &Stylist) -> Result<Salon> {
        if stylist.name.trim().is_empty() {
            return Err(SalonError::validation("name", "can't be blank"));
        }
        let salon = self.salon_of(stylist).await?;

        if let Some(existing) = self.store.find_stylist_by_name(salon.id, &stylist.name).await? {
            if existing.id != stylist.id {
                return Err(SalonError::DuplicateName {
                    name: stylist.name.clone(),
                });
            }
        }
        Ok(salon)
    }

    /// 計算並寫入排序欄位；沙龍啟用手動排序時一併更新手動序號
    fn assign_order_index(stylist: &mut Stylist, snapshot: &SalonSnapshot) -> Result<()> {
        let calculator = OrderCalculator::new(&*stylist, Some(snapshot))?;
        let cached = calculator.order_index()?;
        let manual = snapshot
            .has_manual_order()
            .then(|| calculator.manual_position());

        stylist.cached_order_index = cached;
        if manual.is_some() {
            stylist.manual_order_index = manual;
        }
        Ok(())
    }

    /// Validates, recomputes the order index, persists, and then refreshes
    /// the rest of the salon unless `skip_saving_other_stylists` is set.
    pub async fn save(&self, mut stylist: Stylist) -> Result<Stylist> {
        let salon = self.validate(&stylist).await?;
        // 未設定的租金與抽成補為 0
        stylist.clean_values();

        let snapshot = self.snapshot(salon.id).await?;
        Self::assign_order_index(&mut stylist, &snapshot)?;

        let skip_others = stylist.skip_saving_other_stylists;
        let saved = if stylist.is_new_record() {
            self.store.insert_stylist(stylist).await?
        } else {
            self.store.update_stylist(&stylist).await?;
            stylist
        };
        tracing::info!(
            stylist = %saved.name,
            salon_id = salon.id,
            order_index = saved.cached_order_index,
            "saved stylist"
        );

        // 重新計算同沙龍其他美髮師的排序
        if !skip_others {
            self.resave_salon(salon.id).await?;
        }
        Ok(saved)
    }

    /// Recomputes and stores the order index of every stylist in the salon.
    pub async fn resave_salon(&self, salon_id: SalonId) -> Result<usize> {
        let snapshot = self.snapshot(salon_id).await?;
        let mut updated = 0;

        for stylist in snapshot.stylists() {
            let mut stylist = stylist.clone();
            // 避免連鎖重存
            stylist.skip_saving_other_stylists = true;
            stylist.clean_values();
            Self::assign_order_index(&mut stylist, &snapshot)?;
            self.store.update_stylist(&stylist).await?;
            updated += 1;
        }

        tracing::debug!(salon_id, updated, "resaved salon stylists");
        Ok(updated)
    }

    /// 行事曆欄位：啟用中、非櫃台的美髮師，依排序欄位排列
    pub async fn calendar_stylists(&self, salon_id: SalonId) -> Result<Vec<Stylist>> {
        Ok(self.snapshot(salon_id).await?.calendar_stylists())
    }

    fn persisted_id(stylist: &Stylist) -> Result<StylistId> {
        stylist
            .id
            .ok_or_else(|| SalonError::validation("id", "stylist has not been saved"))
    }

    async fn stylist_service(&self, stylist: &Stylist, service: &Service) -> Result<Option<StylistService>> {
        let (Some(stylist_id), Some(service_id)) = (stylist.id, service.id) else {
            return Ok(None);
        };
        Ok(self
            .store
            .stylist_services(stylist_id)
            .await?
            .into_iter()
            .find(|ss| ss.service_id == service_id))
    }

    pub async fn service_length(&self, stylist: &Stylist, service: &Service) -> Result<Option<u32>> {
        Ok(self
            .stylist_service(stylist, service)
            .await?
            .and_then(|ss| ss.length_in_minutes))
    }

    pub async fn service_price(&self, stylist: &Stylist, service: &Service) -> Result<Option<f64>> {
        Ok(self
            .stylist_service(stylist, service)
            .await?
            .and_then(|ss| ss.price))
    }

    /// Replaces the stylist's services from form columns aligned with the
    /// salon's active services. Rows with neither a length nor a price are dropped.
    pub async fn save_services(&self, stylist: &Stylist, lengths: &[String], prices: &[String]) -> Result<usize> {
        let stylist_id = Self::persisted_id(stylist)?;
        let salon = self.salon_of(stylist).await?;

        // 先清除舊設定再依表單重建
        self.store.delete_stylist_services(stylist_id).await?;

        let services = self.store.active_services(salon.id).await?;
        let mut created = 0;
        for (i, service) in services.iter().enumerate() {
            let length = lengths.get(i).map(String::as_str).unwrap_or("");
            let price = prices.get(i).map(String::as_str).unwrap_or("");
            let length_minutes = form_integer(length);

            if length_minutes > 0 || form_integer(price) > 0 {
                let Some(service_id) = service.id else {
                    continue;
                };
                self.store
                    .insert_stylist_service(StylistService {
                        stylist_id,
                        service_id,
                        length_in_minutes: (length_minutes > 0)
                            .then(|| u32::try_from(length_minutes).unwrap_or(u32::MAX)),
                        price: (!price.trim().is_empty()).then(|| form_decimal(price)),
                    })
                    .await?;
                created += 1;
            }
        }

        tracing::debug!(stylist_id, created, "saved stylist services");
        Ok(created)
    }

    /// Seeds two haircut services for a freshly created demo stylist.
    pub async fn save_services_for_demo(&self, stylist: &Stylist) -> Result<()> {
        let stylist_id = Self::persisted_id(stylist)?;
        let salon = self.salon_of(stylist).await?;

        for (name, price, length) in [("Men's Haircut", 20.0, 30), ("Women's Haircut", 20.0, 40)] {
            let service = self
                .store
                .insert_service(Service {
                    id: None,
                    salon_id: salon.id,
                    name: name.to_string(),
                    price,
                    active: true,
                })
                .await?;
            let service_id = service
                .id
                .ok_or_else(|| SalonError::validation("service.id", "store did not assign an id"))?;
            self.store
                .insert_stylist_service(StylistService {
                    stylist_id,
                    service_id,
                    length_in_minutes: Some(length),
                    price: None,
                })
                .await?;
        }
        Ok(())
    }

    /// 以目前租金與今天日期建立尚未儲存的繳租紀錄
    pub fn new_rent_payment(stylist: &Stylist) -> Result<RentPayment> {
        Ok(RentPayment {
            id: None,
            stylist_id: Self::persisted_id(stylist)?,
            date: Local::now().date_naive(),
            amount: stylist.rent.unwrap_or(0.0),
        })
    }

    pub async fn pay_rent(&self, stylist: &Stylist, date: Option<NaiveDate>) -> Result<RentPayment> {
        let mut payment = Self::new_rent_payment(stylist)?;
        if let Some(date) = date {
            payment.date = date;
        }
        let payment = self.store.insert_rent_payment(payment).await?;
        tracing::info!(stylist = %stylist.name, amount = payment.amount, date = %payment.date, "rent paid");
        Ok(payment)
    }

    pub async fn rent_payments(&self, stylist: &Stylist) -> Result<Vec<RentPayment>> {
        self.store.rent_payments(Self::persisted_id(stylist)?).await
    }

    /// 該時間是否已有未取消的預約
    pub async fn has_appointment_at(&self, stylist: &Stylist, start_time: NaiveDateTime) -> Result<bool> {
        let stylist_id = Self::persisted_id(stylist)?;
        Ok(self
            .store
            .appointments_for_stylist(stylist_id)
            .await?
            .iter()
            .any(|a| a.start_time == start_time && !a.is_cancelled))
    }

    pub async fn unique_clients_ordered_by_name(&self, stylist: &Stylist) -> Result<Vec<Client>> {
        let stylist_id = Self::persisted_id(stylist)?;
        let mut seen = HashSet::new();
        let mut clients = Vec::new();

        for appointment in self.store.appointments_for_stylist(stylist_id).await? {
            // 每位客人只列一次
            if !seen.insert(appointment.client_id) {
                continue;
            }
            if let Some(client) = self.store.client(appointment.client_id).await? {
                clients.push(client);
            }
        }

        clients.sort_by_key(|c| c.name.trim().to_uppercase());
        Ok(clients)
    }

    /// 僱用類型代碼，未設定時為空字串
    pub async fn stylist_employment_type_code(&self, stylist: &Stylist) -> Result<String> {
        let Some(type_id) = stylist.employment_type_id else {
            return Ok(String::new());
        };
        Ok(self
            .store
            .employment_type(type_id)
            .await?
            .map(|t| t.code)
            .unwrap_or_default())
    }

    async fn appointment_lines(&self, stylist_id: StylistId) -> Result<Vec<AppointmentLine>> {
        let mut lines = Vec::new();
        for appointment in self.store.appointments_for_stylist(stylist_id).await? {
            let client_name = self.store.client(appointment.client_id).await?.map(|c| c.name);
            let items = self.store.transaction_items(appointment.id).await?;
            lines.push(AppointmentLine {
                appointment,
                client_name,
                items,
            });
        }
        Ok(lines)
    }

    /// Sales lines for the week starting at `date` (`YYYY-MM-DD`).
    pub async fn report(&self, stylist: &Stylist, date: &str) -> Result<Vec<ReportRow>> {
        let start = report::parse_report_date(date)?;
        let salon = self.salon_of(stylist).await?;
        let lines = self.appointment_lines(Self::persisted_id(stylist)?).await?;

        let window = ReportWindow::starting(start, self.settings.report_days);
        let rows = report::build_report(&lines, salon.tax_rate, window);
        tracing::debug!(stylist = %stylist.name, rows = rows.len(), "built weekly report");
        Ok(rows)
    }

    pub async fn earnings(&self, stylist: &Stylist, start: NaiveDate, end: NaiveDate) -> Result<Earnings> {
        let lines = self.appointment_lines(Self::persisted_id(stylist)?).await?;
        Ok(report::earnings(&lines, start, end))
    }

    pub async fn gross_service_sales(&self, stylist: &Stylist, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        Ok(self.earnings(stylist, start, end).await?.services)
    }

    pub async fn net_service_sales(&self, stylist: &Stylist, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        let gross = self.gross_service_sales(stylist, start, end).await?;
        Ok(gross * stylist.service_commission_rate.unwrap_or(0.0))
    }

    pub async fn gross_product_sales(&self, stylist: &Stylist, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        Ok(self.earnings(stylist, start, end).await?.products)
    }

    pub async fn net_product_sales(&self, stylist: &Stylist, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        let gross = self.gross_product_sales(stylist, start, end).await?;
        Ok(gross * stylist.retail_commission_rate.unwrap_or(0.0))
    }
}
