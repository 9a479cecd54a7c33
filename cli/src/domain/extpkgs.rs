//! Discovery of FairSoft's external packages from its clean script.
//!
//! `make_clean.sh` defines one shell function per package:
//!
//! ```text
//! clean_root() {
//!     ...
//! }
//! ```
//!
//! Every `clean_<NAME>() {` line at the start of a line yields `NAME`;
//! the aggregate `clean_all` is not a package.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Name of the clean script inside the FairSoft checkout.
pub const CLEAN_SCRIPT: &str = "make_clean.sh";

/// Argument of the clean script that cleans every package.
pub const CLEAN_ALL: &str = "all";

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static CLEAN_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^clean_(?P<pkg>[A-Za-z0-9_.+-]+?)\s*\(\)\s*\{").expect("valid clean_ pattern")
});

/// Package names defined in the text of `make_clean.sh`, sorted.
#[must_use]
pub fn parse_clean_targets(script: &str) -> BTreeSet<String> {
    script
        .lines()
        .filter_map(|line| CLEAN_FN.captures(line))
        .map(|caps| caps["pkg"].to_string())
        .filter(|pkg| pkg != CLEAN_ALL)
        .collect()
}
