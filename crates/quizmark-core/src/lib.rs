pub mod locate;
pub mod preprocess;

pub use locate::locate;
