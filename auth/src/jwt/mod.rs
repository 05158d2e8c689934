pub mod claims;
pub mod codec;
pub mod context;
pub mod errors;
pub mod handler;

pub use claims::AuthorizationClaims;
pub use claims::Claims;
pub use codec::TokenCodec;
pub use context::SigningContext;
pub use errors::JwtError;
pub use handler::JwtHandler;
