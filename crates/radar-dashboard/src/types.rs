use std::collections::BTreeMap;

use radar_client::{
    MentionsHistoryPoint, MentionsOverview, ShareOfVoice, ShareOfVoiceHistoryPoint, SiteMetrics,
};
use serde::Serialize;

/// Everything one aggregation run produced.
///
/// `mentions_history` has an entry for every configured brand; an entry is
/// empty when that brand's call failed. `seo` only holds brands with a domain
/// whose site-metrics call succeeded with a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub mentions: Vec<MentionsOverview>,
    pub share_of_voice: Vec<ShareOfVoice>,
    pub mentions_history: BTreeMap<String, Vec<MentionsHistoryPoint>>,
    pub sov_history: Vec<ShareOfVoiceHistoryPoint>,
    pub seo: BTreeMap<String, SiteMetrics>,
}
