//! Operation profile resolution.

use quotedesk_common::{ChannelProfile, ChannelSlug, Direction, OperationProfile};

/// Pick the profile used for pricing: the first active one, else the first.
pub fn select_profile(profiles: &[OperationProfile]) -> Option<&OperationProfile> {
    profiles
        .iter()
        .find(|p| p.active)
        .or_else(|| profiles.first())
}

/// Resolve the operation profile for a channel and direction.
///
/// Disabled channels still resolve; callers gate them.
pub fn resolve_profile<'a>(
    channels: &'a [ChannelProfile],
    slug: &ChannelSlug,
    direction: Direction,
) -> Option<&'a OperationProfile> {
    let channel = channels.iter().find(|c| &c.slug == slug)?;
    select_profile(channel.profiles(direction))
}
