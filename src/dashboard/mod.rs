// Merchant home page: identity resolution and navigation dispatch
pub mod host;
pub mod page;
pub mod toast;

pub use host::{KeyValueStore, MemoryStore, NavAction, Navigation, PageHost};
pub use page::{
    encode_uri_component, merchant_id_from_url, page_with_merchant, DispatchOutcome, IndexPage,
    InitOutcome, MerchantSession,
};
pub use toast::{Toast, ToastBoard, ERROR_TOAST_LIFETIME};
