//! Domain Layer
//!
//! Ports (collaborator interfaces), value objects, and the pure text
//! transformations of a deploy run. Nothing here touches disk or git.

pub mod ports;
pub mod services;
pub mod value_objects;
