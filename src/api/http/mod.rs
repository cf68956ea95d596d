// src/api/http/mod.rs

pub mod facts;
pub mod handlers;
pub mod router;

pub use facts::CreateFactRequest;
pub use router::{create_router, facts_router};
