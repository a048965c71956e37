pub mod components;
pub mod effects;
pub mod model;
pub mod notices;
pub mod reducer;
pub mod runtime_context;

mod effect_executor;

pub use components::{AdminPage, HomePage, NoticeShelf, SignInPage};
pub use model::*;
pub use notices::{Notice, NoticeLevel};
pub use reducer::{reduce_catalog, CatalogAction, CatalogEffect, CatalogReducerError};
pub use runtime_context::{use_catalog_runtime, CatalogProvider, CatalogRuntimeContext};
