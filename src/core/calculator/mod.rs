pub mod deadline;
pub mod remaining;
pub mod timeline;
