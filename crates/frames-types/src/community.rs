//! Community assignment types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matrix::TopicId;
use crate::palette::color_for;

/// One algorithm's partition of the topic graph, with display colors.
///
/// Community indices are sequential from 0 in the order the algorithm
/// returned its communities; indices are meaningless across algorithms
/// (community 2 from one algorithm has no relation to community 2 from
/// another). A topic absent from `membership` was not assigned by the
/// algorithm at all - callers must not conflate absence with community 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityAssignment {
    /// Raw communities in algorithm order, each a set of topic ids
    pub communities: Vec<Vec<TopicId>>,
    /// Topic → community index
    pub membership: HashMap<TopicId, usize>,
    /// Topic → display color (palette cycle over community index)
    pub colors: HashMap<TopicId, String>,
}

impl CommunityAssignment {
    /// Build an assignment from communities in algorithm order.
    ///
    /// Indices are assigned 0, 1, 2, ... and colors follow the fixed
    /// palette cycle, so the color of a topic is a function of its
    /// community index alone.
    pub fn from_communities(communities: Vec<Vec<TopicId>>) -> Self {
        let mut membership = HashMap::new();
        let mut colors = HashMap::new();
        for (index, members) in communities.iter().enumerate() {
            for &topic in members {
                membership.insert(topic, index);
                colors.insert(topic, color_for(index).to_string());
            }
        }
        Self {
            communities,
            membership,
            colors,
        }
    }

    /// Number of communities.
    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    /// Community index of a topic, if the algorithm assigned one.
    pub fn community_of(&self, topic: TopicId) -> Option<usize> {
        self.membership.get(&topic).copied()
    }

    /// Display color of a topic, if the algorithm assigned one.
    pub fn color_of(&self, topic: TopicId) -> Option<&str> {
        self.colors.get(&topic).map(|c| c.as_str())
    }
}
