mod spec;

pub use spec::SizeSpec;
