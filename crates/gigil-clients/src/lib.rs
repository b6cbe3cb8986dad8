//! gigil-clients — network clients for the CMS and the gifting service.
//!
//! Everything here talks HTTP through the [`Transport`] seam. The blog client
//! resolves its collection name once through a shared [`EndpointResolver`] and
//! normalises every record with [`gigil_core::Normalizer`]; the gifting client
//! passes its bodies through untouched.
//!
//! ```text
//! BlogClient ──► EndpointResolver ──┐
//!     │                             ├──► Transport (HyperTransport)
//!     └──────────────► Normalizer   │
//! GiftingClient ────────────────────┘
//! ```

pub mod blog;
pub mod error;
pub mod gifting;
pub mod resolver;
pub mod transport;

pub use blog::BlogClient;
pub use error::{ApiError, ClientError, Result};
pub use gifting::GiftingClient;
pub use resolver::{EndpointResolver, ResolverState};
pub use transport::{HyperTransport, Transport, TransportResponse};
