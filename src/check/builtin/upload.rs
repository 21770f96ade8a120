//! Upload size limits.

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::{format_megabytes, parse_size, Runtime, MEGABYTE};

/// Smallest upload limit that passes, in megabytes.
pub const MINIMUM_UPLOAD_MB: i64 = 8;

/// Checks `upload_max_filesize` and its relation to `post_max_size`.
///
/// Always emits two outcomes: the upload limit is large enough, and POST
/// bodies may be at least as large as an upload. A `post_max_size` of `0`
/// disables the POST limit and satisfies the second condition.
pub struct UploadSizeCheck;

impl Check for UploadSizeCheck {
    fn id(&self) -> CheckId {
        CheckId::new("upload-size")
    }

    fn description(&self) -> &str {
        "upload_max_filesize is at least 8M and fits within post_max_size"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let upload = runtime
            .setting("upload_max_filesize")?
            .as_deref()
            .map(parse_size)
            .unwrap_or(0);
        let post = runtime
            .setting("post_max_size")?
            .as_deref()
            .map(parse_size)
            .unwrap_or(0);

        let large_enough = upload >= MINIMUM_UPLOAD_MB * MEGABYTE;
        let large_enough_message = format!(
            "Your web server rejects uploaded files larger than {}. If the site hosts \
             photography, podcasts or video, consider raising upload_max_filesize to {}MB or \
             more. Ask your host to fix this.",
            format_megabytes(upload),
            MINIMUM_UPLOAD_MB
        );

        let fits_in_post = post == 0 || upload <= post;
        let fits_in_post_message = format!(
            "Your web server accepts uploaded files up to {}, but HTTP POST requests only up to \
             {}. post_max_size should be at least as large as upload_max_filesize. Ask your \
             host to fix this.",
            format_megabytes(upload),
            format_megabytes(post)
        );

        Ok(vec![
            self.outcome(large_enough, large_enough_message),
            self.outcome(fits_in_post, fits_in_post_message),
        ])
    }
}
