//! The economic control loop: tax/subsidy bookkeeping and the dead-band
//! law that steers them block over block.

pub mod adjuster;
pub mod config;
pub mod pool;
pub mod state;

pub use adjuster::{ProportionalDeadBandAdjuster, TaxAdjuster};
pub use config::ControlConfig;
pub use pool::ControlPool;
pub use state::ControlState;
