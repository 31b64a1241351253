pub(crate) mod controller;
pub(crate) mod frame;
pub(crate) mod notify;
