pub mod deposit;
pub mod emergency_withdraw;
pub mod initialize;
pub mod initialize_position;
pub mod process_report;
pub mod set_deposit_limit;
pub mod shutdown;
pub mod snapshot;
pub mod withdraw;

pub use deposit::*;
pub use emergency_withdraw::*;
pub use initialize::*;
pub use initialize_position::*;
pub use process_report::*;
pub use set_deposit_limit::*;
pub use shutdown::*;
pub use snapshot::*;
pub use withdraw::*;
