pub(crate) mod pauses;
