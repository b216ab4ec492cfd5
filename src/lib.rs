//! Time-bounded game-tree search for chess.
//!
//! Iterative-deepening negamax with alpha-beta pruning, an optional capture
//! quiescence search, heuristic move ordering and an optional transposition
//! cache. The board itself stays behind the [`Position`] trait;
//! [`ChessPosition`] provides it on top of the `chess` crate.
//!
//! ```no_run
//! use chess_think::{ChessPosition, SearchConfig, Searcher};
//!
//! let mut position = ChessPosition::default();
//! let mut searcher = Searcher::new(SearchConfig::quiescent());
//! let best = searcher.think(&mut position, &60_000u64)?;
//! println!("bestmove {}", best);
//! # Ok::<(), chess_think::SearchError>(())
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod position;
pub mod search;
pub mod types;

pub use config::{DrawPolicy, LeafPolicy, SearchConfig};
pub use error::{ConfigError, PositionError, SearchError, SearchResult};
pub use position::{ChessPosition, Played, Position, SearchMove, TaggedMove};
pub use search::{RootReport, SearchStats, Searcher, TimeCeiling, Timer};
pub use types::Score;
