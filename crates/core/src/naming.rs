//! Script filename conventions.
//!
//! Generates deterministic, filesystem-safe names for generated scripts when
//! the caller does not supply one.

use chrono::{Local, NaiveDateTime};

/// Extension every stored script carries.
pub const SCRIPT_EXTENSION: &str = ".py";

/// Maximum number of characters kept from the prompt.
pub const PROMPT_STEM_MAX_LEN: usize = 50;

/// Timestamp suffix format (second resolution).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Generate a script filename from a free-text prompt using the local clock.
///
/// Convention: `{stem}_{YYYY-MM-DD_HH-MM-SS}.py`
///
/// - `stem` = prompt with everything but ASCII letters, digits and spaces
///   removed, spaces replaced by `_`, lowercased, cut to 50 characters
///
/// Two calls in the same second with prompts sharing a stem produce the
/// same name.
pub fn synthesize_filename(prompt: &str) -> String {
    synthesize_filename_at(prompt, Local::now().naive_local())
}

/// [`synthesize_filename`] with an explicit timestamp.
///
/// # Examples
///
/// ```
/// use buffer_core::naming::synthesize_filename_at;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2023, 10, 27)
///     .unwrap()
///     .and_hms_opt(10, 30, 0)
///     .unwrap();
/// assert_eq!(
///     synthesize_filename_at("make a backup script", at),
///     "make_a_backup_script_2023-10-27_10-30-00.py"
/// );
/// ```
pub fn synthesize_filename_at(prompt: &str, at: NaiveDateTime) -> String {
    let stem: String = prompt
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .take(PROMPT_STEM_MAX_LEN)
        .collect();

    format!("{stem}_{}{SCRIPT_EXTENSION}", at.format(TIMESTAMP_FORMAT))
}

/// Append [`SCRIPT_EXTENSION`] to a caller-supplied name if it is missing.
pub fn normalize_filename(name: &str) -> String {
    if name.ends_with(SCRIPT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SCRIPT_EXTENSION}")
    }
}
