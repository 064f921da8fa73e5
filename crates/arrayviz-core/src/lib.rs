pub mod bounds;
pub mod camera;
pub mod constants;
pub mod entity;
pub mod error;
pub mod form;
pub mod orchestrator;
pub mod placement;
pub mod scene;
pub mod view;

pub use bounds::*;
pub use camera::*;
pub use entity::*;
pub use error::*;
pub use form::*;
pub use orchestrator::*;
pub use scene::*;
pub use view::*;
