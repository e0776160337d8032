mod nav;
mod remote_row;
mod toast;

pub use nav::Nav;
pub use remote_row::RemoteRow;
pub use toast::{ToastContainer, ToastKind, ToastProvider, use_toasts};
