use crate::jwt::SessionClaims;

/// The resolved caller identity.
///
/// This is the credential threaded explicitly through every store
/// operation. Holding one means the bearer token already validated;
/// there is no way to construct an `Identity` from an unauthenticated
/// request path.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable unique subject issued by the identity provider.
    pub subject: String,
    /// Display name, when the provider supplied one.
    pub name: Option<String>,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Identity {
            subject: claims.sub,
            name: claims.name,
        }
    }
}
