pub(crate) mod clean;
pub(crate) mod reader;
