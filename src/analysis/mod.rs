//! Text normalization, mention counting and aggregation.
//!
//! Everything in this module is synchronous and infallible once its inputs
//! are validated: missing record fields become empty text and empty text
//! becomes an empty [`Tally`].
//!
//! # Submodules
//!
//! - [`normalize`]: record → lowercase text
//! - [`mentions`]: label matching under a [`MatchPolicy`]
//! - [`keywords`]: stop-word filtered token counts
//! - [`tally`]: the [`Tally`] type, aggregation and ranking

pub mod keywords;
pub mod mentions;
pub mod normalize;
pub mod tally;

pub use keywords::{KeywordFilter, count_keywords};
pub use mentions::{LabelSet, MatchPolicy, count_mentions};
pub use normalize::{TextFields, normalize};
pub use tally::{MentionKey, Tally, render_ranked};
