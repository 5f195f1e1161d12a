pub mod authz;
pub mod database;
pub mod history;
pub mod metrics;
pub mod schedule;

pub use authz::{authorize_lease_access, LeaseRole};
pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
