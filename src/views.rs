//! Static intake page: a feedback form plus a readout that renders the
//! summary, sentiment, urgency and themes of the analysis.

pub const INDEX_HTML: &str = include_str!("../assets/index.html");
