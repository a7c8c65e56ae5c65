pub(crate) mod binding;
pub(crate) mod controller;
pub(crate) mod profile;
