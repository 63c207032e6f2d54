//! The scheduling policies.
//!
//! Every policy lives in its own file and is exported here.
//! The heap shared by the shortest-first policies stays private.

mod ready_heap;

mod fcfs;
pub use fcfs::Fcfs;

mod round_robin;
pub use round_robin::RoundRobin;

mod spn;
pub use spn::Spn;

mod srt;
pub use srt::Srt;

mod hrrn;
pub use hrrn::Hrrn;
