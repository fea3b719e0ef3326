pub mod dates;
pub mod watch;
