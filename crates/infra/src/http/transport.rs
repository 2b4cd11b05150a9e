//! Choice of the transport that executes a request.

use std::fmt;
use std::sync::Arc;

use ledgerlink_core::{AuthContext, RequestPrimitive};

use super::fetch::Fetch;

/// Which transport a sender uses for one call.
#[derive(Clone)]
pub enum Transport {
    /// The host's callback primitive, adapted by [`super::fetch_from_callback`].
    Primitive(Arc<dyn RequestPrimitive>),
    /// A fetch supplied when the sender was built.
    Direct(Arc<dyn Fetch>),
    /// The built-in reqwest transport.
    Platform,
}

impl Transport {
    /// Precedence: host primitive, then the supplied fetch, then the platform.
    pub fn resolve(auth: &AuthContext, direct: Option<&Arc<dyn Fetch>>) -> Self {
        if let Some(primitive) = &auth.primitive {
            return Self::Primitive(Arc::clone(primitive));
        }
        match direct {
            Some(fetch) => Self::Direct(Arc::clone(fetch)),
            None => Self::Platform,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Direct(_) => "direct",
            Self::Platform => "platform",
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
