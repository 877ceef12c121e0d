//! Built-in attribute layers.
//!
//! Stacks, bottom to top:
//!
//! | ecosystem | layers                                     |
//! |-----------|--------------------------------------------|
//! | java      | identity, common, java                     |
//! | net       | identity, common, net                      |
//! | fvc       | identity, common, net, fvc                 |
//!
//! Project settings are merged last as a
//! [`SettingsLayer`](crate::domain::SettingsLayer).

mod common;
mod identity;
mod java;
mod net;
mod submission;

pub use common::{
    CommonLayer, readme_dir_url, readme_url, repository_dir_url, repository_file_url,
};
pub use identity::IdentityLayer;
pub use java::JavaLayer;
pub use net::{NetLayer, STANDARD_TEST_DEPENDENCIES};
pub use submission::SubmissionLayer;
