// Service exports
pub mod cache;
pub mod calendar;
pub mod roster;

pub use cache::{RosterCache, CacheError, CacheStats};
pub use calendar::{build_invite, CalendarInvite};
pub use roster::{RosterClient, RosterError};
