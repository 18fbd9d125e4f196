pub mod directory;
pub mod formatting;
pub mod ordering;
pub mod report;
pub mod roster;

pub use crate::domain::model::{Salon, Stylist};
pub use crate::domain::ports::{SalonDirectory, StylistStore};
pub use crate::utils::error::Result;
