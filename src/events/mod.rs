pub mod form;
pub mod pointer;

pub use form::{wire_form_handlers, wire_resize, wire_submit};
pub use pointer::{wire_camera_handlers, CameraWiring};
