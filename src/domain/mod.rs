pub mod cooldown;
pub mod extract;
pub mod keywords;
pub mod report;

pub use cooldown::*;
pub use extract::*;
pub use keywords::*;
pub use report::*;
