pub mod health;
pub mod leads;

pub use health::health_check;
pub use leads::submit_lead;
