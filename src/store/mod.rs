pub mod gateway;
pub mod http;
pub mod query;
pub mod traits;
pub mod types;

pub use gateway::PropertyGateway;
pub use http::{HttpRecordStore, StoreConfig};
pub use query::{ListingFilters, QueryDescriptor};
pub use traits::RecordStore;
