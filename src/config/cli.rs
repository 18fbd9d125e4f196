use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List a salon's calendar columns in order
    Calendar {
        #[arg(long)]
        salon: i64,
    },

    /// Show the position a stylist would get if saved now
    Position {
        #[arg(long)]
        stylist: i64,
    },

    /// Recompute and store every stylist's order index in a salon
    Resave {
        #[arg(long)]
        salon: i64,
    },

    /// Weekly sales report for a stylist
    Report {
        #[arg(long)]
        stylist: i64,

        /// First day of the report (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Write CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Record a rent payment of the stylist's current rent
    PayRent {
        #[arg(long)]
        stylist: i64,

        /// Payment date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<String>,
    },
}
