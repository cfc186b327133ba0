//! Input limits and upload vetting shared by the parser and the web layer.

/// Most tickets accepted in one input, however it arrives.
pub const MAX_TICKETS: usize = 50_000;

/// Longest accepted upload filename.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Content shorter than this is too small for binary sniffing to mean
/// anything.
const BINARY_SNIFF_THRESHOLD: usize = 100;

/// True once `count` tickets are already held and adding another would go
/// over the limit. Callers check this before pushing a new ticket.
#[must_use]
pub fn ticket_limit_reached(count: usize) -> bool {
    count >= MAX_TICKETS
}

/// Rejections raised while vetting an upload, before any parsing runs.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
}

/// Vet an upload filename and strip it down to harmless characters.
///
/// Traversal sequences and path separators are rejected outright rather
/// than stripped, so an attack fails loudly instead of silently mapping
/// onto some other name. Characters outside a small safe set are dropped
/// from the returned name.
///
/// # Errors
///
/// Returns `EmptyFilename` for blank input, `FilenameTooLong` past
/// [`MAX_FILENAME_LENGTH`], and `InvalidFilename` for traversal sequences,
/// control characters, or names with nothing left after sanitizing.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }
    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }
    if filename.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized: String = filename.chars().filter(|&c| is_safe_char(c)).collect();
    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }
    // Dotfiles are not ticket lists; a bare known extension is still fine
    if sanitized.starts_with('.') && !has_known_extension(&sanitized) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ')
}

/// Extensions a ticket list legitimately arrives with.
fn has_known_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    [".txt", ".csv", ".tsv"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Vet upload bytes as plausible ticket text.
///
/// Empty bodies, invalid UTF-8, and content dominated by non-printable
/// bytes are all turned away before the ticket parser sees them.
///
/// # Errors
///
/// Returns `InvalidFileContent` when the bytes cannot be a ticket list.
pub fn validate_file_content(content: &[u8]) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::InvalidFileContent);
    }

    if content.len() > BINARY_SNIFF_THRESHOLD {
        // Whitespace control bytes are the only ones a ticket list has a
        // reason to contain
        let binary = content
            .iter()
            .filter(|&&b| !matches!(b, b'\t'..=b'\r' | b' '..=b'~'))
            .count();
        // Up to 5% line noise is tolerated before calling it binary
        if binary * 20 > content.len() {
            return Err(ValidationError::InvalidFileContent);
        }
    }

    if std::str::from_utf8(content).is_err() {
        return Err(ValidationError::InvalidFileContent);
    }

    Ok(())
}

/// Run the full upload vetting: filename (when one was sent) plus content.
/// The sanitized filename comes back for later stages to use.
///
/// # Errors
///
/// Propagates the first failed check.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<Option<String>, ValidationError> {
    let sanitized = filename.map(validate_filename).transpose()?;
    validate_file_content(content)?;
    Ok(sanitized)
}
