mod key;
mod signature;
mod signer;

pub use key::*;
pub use signature::*;
pub use signer::*;
