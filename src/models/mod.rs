//! Entity models for the generated dataset.
//!
//! Every entity is immutable once emitted: created exactly once during its
//! synthesizer phase, never updated, never deleted. Struct field order is the
//! CSV column order.

pub mod event;
pub mod goods_receipt;
pub mod invoice;
pub mod purchase_order;
pub mod supplier_history;
pub mod vendor;

pub use event::{Event, EventOutcome};
pub use goods_receipt::GoodsReceipt;
pub use invoice::{Invoice, InvoiceStatus};
pub use purchase_order::{PurchaseOrder, PurchaseOrderStatus};
pub use supplier_history::{Recommendation, RiskTrend, SupplierHistory};
pub use vendor::{RiskBand, Vendor, VendorStatus};
