// Thin namespace wrapper for HTTP-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod responses {
    pub use crate::responses::*;
}

pub mod routes {
    pub use crate::routes::*;
}
