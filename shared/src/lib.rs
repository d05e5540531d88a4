//! Engine-independent core of the balloon park: configuration, the user
//! snapshot wire format, balloon motion, the cloud field and the scene state
//! that ties them together.

pub mod balloon;
pub mod clouds;
pub mod config;
pub mod error;
pub mod motion;
pub mod point;
pub mod protocol;
pub mod scene;
