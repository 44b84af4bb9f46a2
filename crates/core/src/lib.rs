pub mod date;
pub mod error;
pub mod money;
pub mod transaction;

pub use date::{normalize_date, EntryDate};
pub use error::FormatError;
pub use money::{to_magnitude, Money};
pub use transaction::StatementEntry;
