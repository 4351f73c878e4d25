pub(crate) mod font;
pub(crate) mod image;
pub(crate) mod registry;
