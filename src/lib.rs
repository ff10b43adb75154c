//! # Pipekit
//!
//! Pipekit is a grab-bag of the utilities every DCC pipeline script ends
//! up growing by hand: typed environment access, folder scaffolding,
//! versioned-file bookkeeping, structured-data I/O, and process
//! launching. The goal is to standardize the patterns (and sand off the
//! footguns) so tool code can stay about the tool.
//!
//! ## Design notes
//!
//! - **Library first.** Nothing here assumes a terminal except the
//!   explicitly print-flavored helpers in [`text`]; everything else takes
//!   regular arguments and returns regular `Result`s, so the same code
//!   serves shell scripts, DCC embedded interpreters, and services.
//! - **Absent is not an error.** Lookups return `Option`
//!   ([`env::get_str`], [`proc::which`]) and readers return `Ok(None)`
//!   for missing files ([`structured::read_json`]). Errors are reserved
//!   for operations that actually failed.
//! - **Windows is a first-class target.** Path validation knows the
//!   reserved device names and `MAX_PATH` ([`fs::can_create_path`]),
//!   detached spawning uses the right creation flags, and `which`
//!   understands `PATHEXT`.
//!
//! ## Module overview
//!
//! - [`env`]: typed environment variables and `.env` loading
//! - [`fs`]: directory scaffolding, natural sorting, path validation
//! - [`version`]: `_v001`-style versioned-file conventions
//! - [`casing`]: PascalCase / camelCase / snake_case conversion
//! - [`size`]: human-readable byte counts and length-unit conversion
//! - [`text`]: headers, tagged status lines, progress bar
//! - [`timing`]: stopwatches that report through `tracing`
//! - [`proc`]: detached process launching and executable lookup
//! - [`sysinfo`]: timestamp strings and OS identification
//! - [`structured`]: JSON / YAML / XML / CSV file I/O
//! - [`error`]: the crate-wide error type

pub mod casing;
pub mod env;
pub mod error;
pub mod fs;
pub mod proc;
pub mod size;
pub mod structured;
pub mod sysinfo;
pub mod text;
pub mod timing;
pub mod version;

pub use error::{PipekitError, Result};
