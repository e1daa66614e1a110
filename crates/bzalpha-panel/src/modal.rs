use bzalpha_contracts::OrderId;

/// State of the modal that hosts a form. The confirm button shows a spinner
/// while a submit is in flight and is re-enabled when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalForm {
    pub title: &'static str,
    open: bool,
    confirm_loading: bool,
}

impl ModalForm {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            open: false,
            confirm_loading: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_confirm_loading(&self) -> bool {
        self.confirm_loading
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.confirm_loading = false;
    }

    pub(crate) fn begin_submit(&mut self) {
        self.confirm_loading = true;
    }

    /// The submit went through: close.
    pub(crate) fn done(&mut self) {
        self.confirm_loading = false;
        self.open = false;
    }

    /// The submit failed: stay open so the user can retry.
    pub(crate) fn error(&mut self) {
        self.confirm_loading = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: &'static str,
    pub ok_text: &'static str,
    pub cancel_text: &'static str,
    pub destructive: bool,
    pub target: OrderId,
}

impl ConfirmDialog {
    pub fn cancel_order(target: OrderId) -> Self {
        Self {
            title: "Are you sure cancel this order?",
            ok_text: "Yes",
            cancel_text: "No",
            destructive: true,
            target,
        }
    }

    /// Matches a typed answer against the dialog's buttons.
    pub fn confirms(&self, answer: &str) -> bool {
        let answer = answer.trim();
        answer.eq_ignore_ascii_case(self.ok_text) || answer.eq_ignore_ascii_case("y")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_lifecycle() {
        let mut modal = ModalForm::new("Add New Order");
        modal.open();
        modal.begin_submit();
        assert!(modal.is_confirm_loading());

        modal.error();
        assert!(modal.is_open());
        assert!(!modal.is_confirm_loading());

        modal.begin_submit();
        modal.done();
        assert!(!modal.is_open());
    }

    #[test]
    fn test_confirm_dialog_answers() {
        let dialog = ConfirmDialog::cancel_order(OrderId(3));

        assert!(dialog.destructive);
        assert!(dialog.confirms("Yes"));
        assert!(dialog.confirms(" y\n"));
        assert!(!dialog.confirms("No"));
        assert!(!dialog.confirms(""));
    }
}
