//! Topicplot - compare topic-model evaluation runs
//!
//! Topicplot reads line-delimited JSON result records written by topic-model
//! evaluation runs and draws one comparison figure per dataset: diversity,
//! external coherence and internal coherence against the number of topics,
//! for every model and embedding that was evaluated.
//!
//! # Input
//!
//! Each line of a results file is one run:
//!
//! ```text
//! {"dataset": "20NG", "model": "S3", "n_topics": 20, "seed": 1,
//!  "results": {"diversity": 0.91, "wec_ex": 0.23, "wec_in": 0.31}}
//! ```
//!
//! The nested `results` object is flattened into the record and the record is
//! tagged with the file it came from. The file name also decides the
//! embedding label (`intfloat...` is e5-large-v2, `...MiniLM...` is
//! MiniLM-L6-v2, anything else keeps the file name).
//!
//! # Quick Start
//!
//! ```no_run
//! use topicplot::{Config, Pipeline, PngRenderer, RunOutcome};
//!
//! let config = Config::new().with_results_dir("./results").with_show(false);
//! let outcome = Pipeline::new(config).run(&mut PngRenderer::new())?;
//!
//! if let RunOutcome::Rendered { saved, .. } = outcome {
//!     println!("{} figure(s) written", saved.len());
//! }
//! # Ok::<(), topicplot::TopicPlotError>(())
//! ```
//!
//! # Figures
//!
//! Each figure has three panels. Lines are colored by model and marked by
//! embedding; repeated runs at the same topic count are averaged and drawn
//! with a bootstrap confidence band.
//!
//! # Modules
//!
//! - [`loader`]: reading and flattening result files
//! - [`aggregate`]: the record table, statistics, and figure model
//! - [`render`]: PNG output
//! - [`report`]: summary export (JSON, CSV)

pub mod aggregate;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod report;

pub use aggregate::figure::{Figure, Metric, Panel, Series, SeriesPoint, METRICS};
pub use aggregate::Table;
pub use config::{BandConfig, Config, PathMode};
pub use error::{Result, TopicPlotError};
pub use loader::{LoadReport, Loader};
pub use pipeline::{Pipeline, RunOutcome, RunStats};
pub use render::{FigureRenderer, PngRenderer};
