// src/view_lib/mod.rs
pub mod camera;
pub mod command;
pub mod controller;
pub mod notice;
pub mod session;

pub use camera::ViewTransform;
pub use command::Command;
pub use controller::InputController;
pub use notice::{Notice, NoticeBoard};
pub use session::{DisplayMode, Selection, Session};
