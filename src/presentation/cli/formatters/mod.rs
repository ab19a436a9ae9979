pub mod alert_fmt;
pub mod cluster_fmt;
