//! Configuration snapshots handed to the engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::identifiers::ChannelSlug;
use crate::profile::{ChannelProfile, Coupon};

/// Immutable view of the pricing configuration supplied by the external store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub channels: Vec<ChannelProfile>,
}

impl ConfigSnapshot {
    /// Create a snapshot from channel profiles.
    pub fn new(channels: Vec<ChannelProfile>) -> Self {
        Self { channels }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Serialize the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a channel by slug.
    pub fn channel(&self, slug: &ChannelSlug) -> Option<&ChannelProfile> {
        self.channels.iter().find(|c| &c.slug == slug)
    }

    /// Find an active coupon anywhere in the configuration.
    ///
    /// Channels are searched in order, sell profiles before buy profiles.
    pub fn find_active_coupon(&self, code: &str) -> Option<&Coupon> {
        self.channels
            .iter()
            .flat_map(|c| c.sell_profiles.iter().chain(c.buy_profiles.iter()))
            .flat_map(|p| p.coupons.iter())
            .find(|c| c.active && c.code == code)
    }
}
