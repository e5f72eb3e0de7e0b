pub mod metrics;
pub mod output;
pub mod parser;
pub mod plotdata;
pub mod roster;
