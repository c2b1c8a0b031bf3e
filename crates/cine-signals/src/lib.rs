//! External signal producer clients.
//!
//! Three independent adapters, each calling a different analysis service
//! and returning raw candidate material:
//! - Generative text: description to a ranked recommendation list, or a
//!   poster image to a single title guess
//! - Reverse image search: image to heterogeneous result items
//! - Vision: image to best-guess labels, web entities, and OCR text
//!
//! Plus [`ImagePayload`], the validated base64 carrier every image entry
//! point shares. API keys live in per-client config structs populated via
//! `from_env()`; nothing here is ambient global state.

pub mod error;
pub mod gemini;
pub mod image;
pub mod reverse_image;
pub mod vision;

pub use error::{SignalError, SignalResult};
pub use gemini::{GeminiClient, GeminiConfig};
pub use image::{ImagePayload, MAX_IMAGE_BYTES};
pub use reverse_image::{ReverseImageClient, ReverseImageConfig, SearchItem};
pub use vision::{VisionAnnotations, VisionClient, VisionConfig, WebEntity};
