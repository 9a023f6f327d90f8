pub mod buffer;
pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod row;
pub mod store;

pub use buffer::TextBuffer;
pub use config::AppConfig;
pub use error::{RowError, StoreError};
pub use model::{Task, TaskCollection, TaskId};
pub use prompt::{Answer, ConfirmRemoval, DuplicateTitleAlert, RemovalPrompt};
pub use row::{RowMode, TaskRowController, TitleEditor};
pub use store::{Clock, Removal, SystemClock, TaskStore};
