pub mod classifier;
pub mod console;
pub mod constants;
pub mod eligibility;
pub mod engine;
pub mod host;
pub mod ledger;
pub mod logging;
pub mod participants;
pub mod rng;
pub mod room;
pub mod save_data;
pub mod types;
