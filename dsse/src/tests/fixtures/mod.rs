mod identities;
mod stubs;

pub use identities::*;
pub use stubs::*;
