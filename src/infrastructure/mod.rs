pub mod ai;
pub mod notifications;
pub mod persistence;
