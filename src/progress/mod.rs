pub(crate) mod indicator;
