// Domain-layer modules and shared errors/models
pub mod pipeline {
    pub use crate::pipeline::*;
}

pub mod enrichment {
    pub use crate::enrichment::*;
}

pub mod validation {
    pub use crate::validation::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
