//! Removal of terminal escape sequences from captured output.
//!
//! Best effort: linters write color codes even when told not to, and some
//! wrappers strip the ESC byte but leave the rest of the sequence behind.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// CSI (`ESC [ ...`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`) and
/// two-byte `ESC <char>` escapes.
static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-_]")
        .expect("Invalid escape sequence regex")
});

/// SGR fragments that lost their ESC byte.
///
/// Only these exact fragments are removed, so bracketed rule names such as
/// `[truthy]` or `[12]` survive.
pub const STRAY_FRAGMENTS: &[&str] = &[
    "[0m", "[1m", "[2m", "[4m", "[22m", "[39m", "[49m", "[30m", "[31m", "[32m", "[33m", "[34m",
    "[35m", "[36m", "[37m", "[90m", "[91m", "[92m", "[93m", "[94m", "[1;31m", "[1;32m",
    "[1;33m", "[1;34m", "[1;35m", "[1;36m", "[0;31m", "[0;32m", "[0;33m",
];

/// Strips escape sequences and stray color fragments.
///
/// Returns the input borrowed when there is nothing to remove.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    let mut cleaned = if text.contains('\x1b') {
        ESCAPE_REGEX.replace_all(text, "")
    } else {
        Cow::Borrowed(text)
    };

    for fragment in STRAY_FRAGMENTS {
        if cleaned.contains(fragment) {
            cleaned = Cow::Owned(cleaned.replace(fragment, ""));
        }
    }

    cleaned
}
