pub mod audit_event;
pub mod lease;
pub mod payment;

pub use audit_event::{AuditEvent, AuditEventType};
pub use lease::Lease;
pub use payment::{NewRentPayment, Payment, PaymentStatus, PaymentType};
