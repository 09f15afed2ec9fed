//! Core library for batch video codec conversion with an external encoder.
//!
//! This crate finds the video files in a folder, converts each of them with
//! one encoder process (ffmpeg by default), isolates per-file failures and
//! reports progress as a stream of events.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vconv_core::{
//!     Codec, ConversionOrchestrator, ConversionRequest, CoreConfig, EventDispatcher,
//!     SidecarSpawner,
//! };
//!
//! let orchestrator = ConversionOrchestrator::new(SidecarSpawner, CoreConfig::default()).unwrap();
//! let request = ConversionRequest::new("/path/to/videos", Codec::Libx265);
//!
//! let result = orchestrator.run(&request, &EventDispatcher::new()).unwrap();
//! println!(
//!     "{} of {} converted into {}",
//!     result.succeeded(),
//!     result.total,
//!     result.output_directory.display()
//! );
//! ```

pub mod codec;
pub mod config;
pub mod control;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod file_logging;
pub mod processing;
pub mod request;
pub mod utils;

// Re-exports for public API
pub use codec::{Codec, ParseCodecError, ParseProfileError, ProresProfile};
pub use config::CoreConfig;
pub use control::{ControlState, Notice};
pub use discovery::{enumerate_jobs, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use events::{ChannelEventHandler, Event, EventDispatcher, EventHandler, JsonEventHandler};
pub use external::{EncoderProcess, EncoderSpawner, SidecarSpawner, check_dependency};
pub use file_logging::RunLog;
pub use processing::{ConversionOrchestrator, RunHandle};
pub use request::{BatchResult, ConversionOutcome, ConversionRequest, Job, OutcomeStatus};
pub use utils::format_duration;
