pub mod enricher;
pub mod gate;
pub mod notifier;
pub mod store;

pub use enricher::{ClusterEnricher, EnrichmentError};
pub use gate::AlertGate;
pub use notifier::{NotificationError, Notifier};
pub use store::{AlertSink, ReportSource, ReportStore, StoreError};
