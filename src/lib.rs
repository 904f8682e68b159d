// Game core for a map-based street guessing game: the host (map widget,
// toast surface, selection screens) renders state and feeds events; all
// rules, pools, and scoring live here.
pub mod catalog;
pub mod geometry;
pub mod notify;
pub mod outcome;
pub mod random;
pub mod round;
pub mod session;
pub mod setup;

pub use catalog::{Catalog, CatalogStreet, GeoPoint, Level, Street};
pub use notify::{Notification, NoticeDuration, NoticeStatus};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use session::{GameMode, GameSession, GameStats, Highlight, Phase, SessionConfig};
pub use setup::GameSetup;
