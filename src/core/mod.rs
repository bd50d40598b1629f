pub mod campaign;
pub mod cards;
pub mod llm;
pub mod logging;
pub mod permissions;
pub mod session;
pub mod social;
