pub mod diagnostics;
pub mod jobs;

pub mod utils;
