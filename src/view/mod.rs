pub mod notification_view;

pub use notification_view::{ConsoleView, NotificationView};
