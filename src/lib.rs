pub mod cards;
pub mod error;
pub mod table;

pub use crate::cards::card::Card;
pub use crate::cards::category::Category;
pub use crate::cards::deck::Deck;
pub use crate::cards::evaluator::Evaluator;
pub use crate::cards::lookup::LookupTable;
pub use crate::error::Error;
pub use crate::table::config::Config;
pub use crate::table::dealer::Dealer;
pub use crate::table::observation::ActionRecord;
pub use crate::table::observation::Observation;
pub use crate::table::observation::Snapshot;
pub use crate::table::stakes::RaiseCap;
pub use crate::table::stakes::RaiseSize;
pub use crate::table::stakes::Schedule;

/// dimensional analysis types
pub type Chips = i32;
pub type HandRank = u32;
