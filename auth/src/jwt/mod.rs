pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::ClaimSet;
pub use claims::TokenKind;
pub use codec::ClaimsCodec;
pub use errors::JwtError;
