mod notification;

pub use notification::{CreateNotification, Notification};
