//! Publisher identity attributes.

use crate::application::environment::Identity;
use crate::domain::{Layer, Registry};
use crate::error::ProjconfResult;

/// Binds the [`Identity`] fields under their own names.
#[derive(Debug, Clone)]
pub struct IdentityLayer {
    identity: Identity,
}

impl IdentityLayer {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

impl Layer for IdentityLayer {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, r: &mut Registry) -> ProjconfResult<()> {
        let id = &self.identity;
        r.constant("author_name", id.author_name.as_str())
            .constant("author_email", id.author_email.as_str())
            .constant("author_url", id.author_url.as_str())
            .constant("code_owner", id.code_owner.as_str())
            .constant("website_domain", id.website_domain.as_str())
            .constant("package_namespace", id.package_namespace.as_str());
        Ok(())
    }
}
