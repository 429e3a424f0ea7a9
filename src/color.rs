pub(crate) mod hsl;
pub(crate) mod transform;
