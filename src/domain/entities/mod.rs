pub mod alert;
pub mod cluster;
pub mod counts;
pub mod report;
pub mod weather;

pub use alert::{AlertKind, ProactiveAlert};
pub use cluster::{ClusterAnalysis, ClusterNarrative, ClusterResult};
pub use counts::{LocationAggregate, SymptomCounts, SymptomTally};
pub use report::{ReportError, SymptomReport};
pub use weather::WeatherContext;
