use crate::domain::model::{SalonId, Stylist};
use crate::domain::ports::{SalonDirectory, StylistStore};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub stylist: Stylist,
    pub receptionist: bool,
}

impl RosterEntry {
    fn on_calendar(&self) -> bool {
        self.stylist.active && !self.receptionist
    }
}

/// A salon's stylists as currently persisted, answering the ordering queries.
#[derive(Debug, Clone)]
pub struct SalonSnapshot {
    salon_id: SalonId,
    entries: Vec<RosterEntry>,
}

impl SalonSnapshot {
    pub fn new(salon_id: SalonId, entries: Vec<RosterEntry>) -> Self {
        Self { salon_id, entries }
    }

    pub async fn load<S: StylistStore + ?Sized>(
        store: &S,
        salon_id: SalonId,
        receptionist_role: &str,
    ) -> Result<Self> {
        let stylists = store.stylists_in_salon(salon_id).await?;
        let mut entries = Vec::with_capacity(stylists.len());

        for stylist in stylists {
            let receptionist = match stylist.user_id {
                Some(user_id) => store
                    .user(user_id)
                    .await?
                    .map(|user| user.has_role(receptionist_role))
                    .unwrap_or(false),
                None => false,
            };
            entries.push(RosterEntry {
                stylist,
                receptionist,
            });
        }

        tracing::debug!(salon_id, stylists = entries.len(), "loaded salon snapshot");
        Ok(Self::new(salon_id, entries))
    }

    pub fn stylists(&self) -> impl Iterator<Item = &Stylist> {
        self.entries.iter().map(|e| &e.stylist)
    }

    /// Active, non-receptionist stylists in calendar column order.
    pub fn calendar_stylists(&self) -> Vec<Stylist> {
        let mut columns: Vec<Stylist> = self
            .entries
            .iter()
            .filter(|e| e.on_calendar())
            .map(|e| e.stylist.clone())
            .collect();
        columns.sort_by_key(|s| s.cached_order_index);
        tracing::debug!(salon_id = self.salon_id, columns = columns.len(), "calendar columns");
        columns
    }
}

impl SalonDirectory for SalonSnapshot {
    fn highest_manual_order_index(&self) -> i64 {
        self.stylists()
            .filter_map(|s| s.manual_order_index)
            .max()
            .unwrap_or(0)
    }

    fn ordered_stylist_names(&self) -> Vec<String> {
        let mut members: Vec<&Stylist> = self
            .entries
            .iter()
            .filter(|e| e.on_calendar())
            .map(|e| &e.stylist)
            .collect();

        if self.has_manual_order() {
            // unset indices sort last
            members.sort_by_key(|s| (s.manual_order_index.is_none(), s.manual_order_index));
        } else {
            members.sort_by_key(|s| s.name.to_lowercase());
        }

        members.into_iter().map(|s| s.name.clone()).collect()
    }

    fn has_manual_order(&self) -> bool {
        self.stylists()
            .any(|s| s.manual_order_index.is_some_and(|i| i > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, name: &str, manual: Option<i64>, active: bool, receptionist: bool) -> RosterEntry {
        let mut stylist = Stylist::new(name, 1);
        stylist.id = Some(id);
        stylist.manual_order_index = manual;
        stylist.active = active;
        stylist.cached_order_index = id;
        RosterEntry {
            stylist,
            receptionist,
        }
    }

    #[test]
    fn test_alphabetical_names_skip_inactive_and_receptionists() {
        let snapshot = SalonSnapshot::new(
            1,
            vec![
                entry(1, "carol", None, true, false),
                entry(2, "Bob", None, true, false),
                entry(3, "Front Desk", None, true, true),
                entry(4, "alice", None, false, false),
            ],
        );

        assert!(!snapshot.has_manual_order());
        assert_eq!(snapshot.ordered_stylist_names(), vec!["Bob", "carol"]);
    }

    #[test]
    fn test_manual_names_follow_manual_index() {
        let snapshot = SalonSnapshot::new(
            1,
            vec![
                entry(1, "alice", Some(3), true, false),
                entry(2, "bob", None, true, false),
                entry(3, "carol", Some(1), true, false),
            ],
        );

        assert!(snapshot.has_manual_order());
        assert_eq!(snapshot.ordered_stylist_names(), vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_highest_manual_index_counts_every_stylist() {
        let snapshot = SalonSnapshot::new(
            1,
            vec![
                entry(1, "alice", Some(2), true, false),
                entry(2, "bob", Some(9), false, false),
            ],
        );
        assert_eq!(snapshot.highest_manual_order_index(), 9);

        let empty = SalonSnapshot::new(1, vec![]);
        assert_eq!(empty.highest_manual_order_index(), 0);
        assert!(!empty.has_manual_order());
    }

    #[test]
    fn test_zero_indices_do_not_enable_manual_order() {
        let snapshot = SalonSnapshot::new(1, vec![entry(1, "alice", Some(0), true, false)]);
        assert!(!snapshot.has_manual_order());
    }

    #[test]
    fn test_calendar_stylists_sorted_by_cached_index() {
        let mut first = entry(5, "zed", None, true, false);
        first.stylist.cached_order_index = 0;
        let mut second = entry(6, "amy", None, true, false);
        second.stylist.cached_order_index = 1;

        let snapshot = SalonSnapshot::new(1, vec![second, entry(7, "desk", None, true, true), first]);
        let names: Vec<String> = snapshot
            .calendar_stylists()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["zed", "amy"]);
    }
}
