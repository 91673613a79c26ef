pub mod run_cycle;

pub use run_cycle::*;
