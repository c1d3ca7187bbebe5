// Session services: the drill-down controller and the commands that drive it.
pub mod commands;
pub mod view_controller;

pub use commands::{apply, Command, Outcome};
pub use view_controller::ViewController;
