//! Port implementations: live (real disk and processes) and replaying
//! (recorded cassettes).

pub mod live;
pub mod replaying;
