pub mod alerts;
pub mod daemon;
pub mod detect;
pub mod evaluate;
pub mod purge;
pub mod report;
