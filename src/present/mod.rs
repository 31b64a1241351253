pub(crate) mod smoothing;
