use crate::domain::model::Stylist;
use crate::domain::ports::SalonDirectory;
use crate::utils::error::{Result, SalonError};

/// Position of an inactive stylist; sorts ahead of every calendar column.
pub const INACTIVE_POSITION: i64 = -1;

/// Computes where a stylist sits among its salon's calendar columns.
pub struct OrderCalculator<'a, D: SalonDirectory> {
    stylist: &'a Stylist,
    salon: D,
}

impl<'a, D: SalonDirectory> OrderCalculator<'a, D> {
    pub fn new(stylist: &'a Stylist, salon: Option<D>) -> Result<Self> {
        let salon = salon.ok_or(SalonError::MissingSalon)?;
        Ok(Self { stylist, salon })
    }

    /// New records go after the salon's highest manual index; persisted
    /// records keep their stored index (unset reads as 0).
    pub fn manual_position(&self) -> i64 {
        if self.stylist.is_new_record() {
            self.salon.highest_manual_order_index().saturating_add(1)
        } else {
            self.stylist.manual_order_index.unwrap_or(0)
        }
    }

    /// Salon names plus this stylist's own, lowercased and sorted.
    pub(crate) fn ranked_names(&self) -> Vec<String> {
        let mut names = self.salon.ordered_stylist_names();
        if !names.iter().any(|n| n == &self.stylist.name) {
            names.push(self.stylist.name.clone());
        }

        let mut lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        lowered.sort();
        lowered
    }

    pub fn alphabetical_position(&self) -> Result<i64> {
        let target = self.stylist.name.to_lowercase();
        self.ranked_names()
            .iter()
            .position(|n| n == &target)
            .map(|i| i as i64)
            .ok_or_else(|| SalonError::EmptyNameList {
                name: self.stylist.name.clone(),
            })
    }

    pub fn order_index(&self) -> Result<i64> {
        if !self.stylist.active {
            return Ok(INACTIVE_POSITION);
        }

        let index = if self.salon.has_manual_order() {
            self.manual_position()
        } else {
            self.alphabetical_position()?
        };
        tracing::debug!(stylist = %self.stylist.name, index, "computed order index");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDirectory {
        names: Vec<&'static str>,
        manual: bool,
        highest: i64,
    }

    impl SalonDirectory for FixedDirectory {
        fn highest_manual_order_index(&self) -> i64 {
            self.highest
        }

        fn ordered_stylist_names(&self) -> Vec<String> {
            self.names.iter().map(|n| n.to_string()).collect()
        }

        fn has_manual_order(&self) -> bool {
            self.manual
        }
    }

    fn alphabetical(names: Vec<&'static str>) -> FixedDirectory {
        FixedDirectory {
            names,
            manual: false,
            highest: 0,
        }
    }

    fn manual(highest: i64) -> FixedDirectory {
        FixedDirectory {
            names: vec!["alice", "carol"],
            manual: true,
            highest,
        }
    }

    fn persisted(name: &str, manual_index: Option<i64>) -> Stylist {
        let mut stylist = Stylist::new(name, 1);
        stylist.id = Some(7);
        stylist.manual_order_index = manual_index;
        stylist
    }

    #[test]
    fn test_inactive_stylist_is_minus_one() {
        let mut stylist = persisted("Bob", Some(4));
        stylist.active = false;

        for dir in [manual(9), alphabetical(vec!["alice"])] {
            let calc = OrderCalculator::new(&stylist, Some(dir)).unwrap();
            assert_eq!(calc.order_index().unwrap(), INACTIVE_POSITION);
        }
    }

    #[test]
    fn test_new_stylist_appends_after_highest_manual_index() {
        let stylist = Stylist::new("Dana", 1);
        let calc = OrderCalculator::new(&stylist, Some(manual(5))).unwrap();
        assert_eq!(calc.manual_position(), 6);
        assert_eq!(calc.order_index().unwrap(), 6);
    }

    #[test]
    fn test_new_stylist_after_max_index_does_not_overflow() {
        let stylist = Stylist::new("Dana", 1);
        let calc = OrderCalculator::new(&stylist, Some(manual(i64::MAX))).unwrap();
        assert_eq!(calc.manual_position(), i64::MAX);
    }

    #[test]
    fn test_persisted_stylist_keeps_manual_index() {
        let stylist = persisted("Dana", Some(2));
        let calc = OrderCalculator::new(&stylist, Some(manual(5))).unwrap();
        assert_eq!(calc.manual_position(), 2);
        assert_eq!(calc.order_index().unwrap(), 2);
    }

    #[test]
    fn test_persisted_stylist_without_manual_index_reads_zero() {
        let stylist = persisted("Dana", None);
        let calc = OrderCalculator::new(&stylist, Some(manual(5))).unwrap();
        assert_eq!(calc.manual_position(), 0);
    }

    #[test]
    fn test_alphabetical_position_inserts_missing_name() {
        let stylist = persisted("Bob", None);
        let calc = OrderCalculator::new(&stylist, Some(alphabetical(vec!["alice", "carol"]))).unwrap();
        assert_eq!(calc.alphabetical_position().unwrap(), 1);
        assert_eq!(calc.order_index().unwrap(), 1);
    }

    #[test]
    fn test_alphabetical_position_is_case_insensitive() {
        let stylist = persisted("alice", None);
        let dir = alphabetical(vec!["Carol", "Bob", "alice", "ZED"]);
        let calc = OrderCalculator::new(&stylist, Some(dir)).unwrap();
        assert_eq!(calc.alphabetical_position().unwrap(), 0);

        let zed = persisted("ZED", None);
        let dir = alphabetical(vec!["Carol", "Bob", "alice", "ZED"]);
        let calc = OrderCalculator::new(&zed, Some(dir)).unwrap();
        assert_eq!(calc.alphabetical_position().unwrap(), 3);
    }

    #[test]
    fn test_present_name_is_not_appended_twice() {
        let carol = persisted("carol", None);
        let dir = alphabetical(vec!["alice", "bob", "carol"]);
        let calc = OrderCalculator::new(&carol, Some(dir)).unwrap();
        assert_eq!(calc.ranked_names(), vec!["alice", "bob", "carol"]);
        assert_eq!(calc.alphabetical_position().unwrap(), 2);

        let dana = persisted("Dana", None);
        let dir = alphabetical(vec!["alice", "bob", "carol"]);
        let calc = OrderCalculator::new(&dana, Some(dir)).unwrap();
        assert_eq!(calc.ranked_names().len(), 4);

        let bob = persisted("bob", None);
        let dir = alphabetical(vec!["alice", "bob", "carol"]);
        let calc = OrderCalculator::new(&bob, Some(dir)).unwrap();
        assert_eq!(calc.alphabetical_position().unwrap(), 1);
    }

    #[test]
    fn test_names_equal_ignoring_case_share_first_index() {
        let stylist = persisted("Bob", None);
        let calc = OrderCalculator::new(&stylist, Some(alphabetical(vec!["bob", "carol"]))).unwrap();
        assert_eq!(calc.ranked_names(), vec!["bob", "bob", "carol"]);
        assert_eq!(calc.alphabetical_position().unwrap(), 0);

        let lower = persisted("bob", None);
        let calc = OrderCalculator::new(&lower, Some(alphabetical(vec!["Bob", "carol"]))).unwrap();
        assert_eq!(calc.alphabetical_position().unwrap(), 0);
    }

    #[test]
    fn test_only_stylist_in_empty_salon_is_first() {
        let stylist = Stylist::new("Solo", 1);
        let calc = OrderCalculator::new(&stylist, Some(alphabetical(vec![]))).unwrap();
        assert_eq!(calc.order_index().unwrap(), 0);
    }

    #[test]
    fn test_order_index_is_idempotent() {
        let stylist = persisted("Bob", None);
        let calc = OrderCalculator::new(&stylist, Some(alphabetical(vec!["carol", "alice"]))).unwrap();
        assert_eq!(calc.order_index().unwrap(), calc.order_index().unwrap());
    }

    #[test]
    fn test_missing_salon_is_reported() {
        let stylist = persisted("Bob", None);
        let result = OrderCalculator::<FixedDirectory>::new(&stylist, None);
        assert!(matches!(result, Err(SalonError::MissingSalon)));
    }
}
