use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(4);

pub(crate) const INPUT_PLACEHOLDER: &str = "Add a new task...";

pub(crate) const HINT_NORMAL: &str =
    "a add • space/d toggle • e edit • x remove • j/k move • q quit";
pub(crate) const HINT_ADD: &str = "Type a title • Enter adds • Esc cancels";
pub(crate) const HINT_EDIT: &str = "Editing title • Enter saves • Esc cancels";
pub(crate) const HINT_ALERT: &str = "Enter/Esc to dismiss";
pub(crate) const HINT_CONFIRM: &str = "←/→ choose • y/n answer • Enter confirms • Esc cancels";

pub(crate) const STATUS_ADDED: &str = "Task added";
pub(crate) const STATUS_RENAMED: &str = "Task renamed";
pub(crate) const STATUS_EDIT_CANCELLED: &str = "Edit cancelled";
pub(crate) const STATUS_REMOVED: &str = "Task removed";
pub(crate) const STATUS_REMOVAL_DECLINED: &str = "Removal cancelled";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No task selected";
