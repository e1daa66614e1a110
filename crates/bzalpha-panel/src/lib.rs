//! Headless components of the order admin panel.
//!
//! Each component owns its view state and exposes what should be drawn; the
//! caller decides how to draw it and supplies the credential for every
//! network call.
pub mod modal;
pub mod notification;
pub mod order_form;
pub mod order_list;
pub mod rank_avatar;
pub mod remote_select;

#[cfg(test)]
mod test_support;

pub use modal::ConfirmDialog;
pub use modal::ModalForm;
pub use notification::Notification;
pub use notification::NotificationLevel;
pub use notification::NotificationSink;
pub use order_form::FieldError;
pub use order_form::FormContext;
pub use order_form::FormDraft;
pub use order_form::OrderCreationForm;
pub use order_form::OwnerField;
pub use order_form::SubmitOutcome;
pub use order_list::ListRender;
pub use order_list::OrderListView;
pub use order_list::OrderRow;
pub use order_list::PendingDetails;
pub use rank_avatar::RankAvatar;
pub use remote_select::RemoteSelect;
pub use remote_select::SelectOption;
