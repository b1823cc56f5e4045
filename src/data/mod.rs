//! Storage port and adapters.

pub mod lead_store {
    pub use crate::lead_store::*;
}

pub mod db_storage {
    pub use crate::db_storage::*;
}

pub mod db {
    pub use crate::db::*;
}
