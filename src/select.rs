pub(crate) mod catalog;
pub(crate) mod descriptor;
pub(crate) mod rng;
