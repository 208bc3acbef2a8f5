//! The admin application shell: screen selection, record lists, edit forms,
//! and user-facing notices, on top of the identity and REST clients.

pub mod notify;
pub mod shell;
pub mod view;

pub use notify::{Notice, NoticeLevel};
pub use shell::{AdminShell, ShellError};
pub use view::{AdminView, Screen};
