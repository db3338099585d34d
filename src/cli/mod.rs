mod args;

pub use args::{CliArgs, ScaleFilter};
