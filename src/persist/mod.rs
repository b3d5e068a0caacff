pub mod npz;
pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;

pub const COMBOS_FILE: &str = "combos.bin";
pub const ODDEVEN_FILE: &str = "oddeven.bin";
pub const SUM_FILE: &str = "sum.bin";
pub const TIER_FILE: &str = "tier.bin";
