pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod image_layer;
pub(crate) mod textbox;
