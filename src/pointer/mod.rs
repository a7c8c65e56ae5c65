pub(crate) mod parallax;
