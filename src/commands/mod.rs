pub mod scan;
pub mod serve;
