//! gigil — content layer for the gifting site.
//!
//! Wires the configuration from [`gigil_core`] to the network clients from
//! [`gigil_clients`] so the binary and the integration tests build their
//! services the same way.
//!
//! # Architecture
//!
//! ```text
//! Config ──► Services ──► BlogClient ──► EndpointResolver ──► CMS
//!                │             └──► Normalizer
//!                └──────► GiftingClient ──────────────────► gifting API
//! ```

use gigil_clients::{BlogClient, EndpointResolver, GiftingClient, HyperTransport};
use gigil_core::config::Config;
use gigil_core::Normalizer;
use std::sync::Arc;

pub use gigil_clients as clients;
pub use gigil_core as content;

/// The clients a process needs, built once from configuration.
///
/// The blog client's endpoint resolver lives for as long as `Services` does,
/// so the collection name is discovered at most once per instance.
pub struct Services {
    pub blog: BlogClient<HyperTransport>,
    pub gifting: GiftingClient<HyperTransport>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let cms = Arc::new(HyperTransport::new(
            config.cms.base_url.as_str(),
            config.cms.timeout_ms,
        ));
        let resolver = Arc::new(EndpointResolver::new(
            cms.clone(),
            config.cms.explicit_endpoint(),
        ));
        let blog = BlogClient::new(cms, resolver, Normalizer::from_config(&config.cms));

        let gifting = GiftingClient::new(Arc::new(HyperTransport::new(
            config.gifting.base_url.as_str(),
            config.gifting.timeout_ms,
        )));

        Self { blog, gifting }
    }

    pub fn resolver(&self) -> &EndpointResolver<HyperTransport> {
        self.blog.resolver()
    }
}
