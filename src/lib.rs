//! Titler: title-model selection with prioritized provider fallback.
//!
//! Picks the model handle a title-generation workflow should invoke: the
//! operator's configured `provider/model` when it can be built, otherwise
//! the highest-priority authenticated provider from a fixed fallback table.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use titler::prelude::*;
//!
//! # async fn example(registry: Arc<dyn ProviderRegistry>) -> titler::error::Result<()> {
//! let config = TitleConfig::from_json_str(r#"{ "model": "anthropic/claude-haiku-4-5" }"#)?;
//! let selection = ModelSelector::new(registry)
//!     .select(config.configured_model())
//!     .await?;
//! println!("{} ({})", selection.model_info, selection.reason);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod selector;
pub mod util;
