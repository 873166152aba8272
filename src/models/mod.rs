pub mod candidate;
pub mod job;

pub use candidate::*;
pub use job::*;
