//! Ashby job-board URL parsing.

/// Host every public Ashby job page is served from.
pub const ASHBY_JOBS_HOST: &str = "jobs.ashbyhq.com";

/// Board and posting identifiers extracted from a job page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AshbyUrl {
    pub board: String,
    pub posting_id: String,
}

/// Extracts `{board, posting_id}` from anything containing
/// `jobs.ashbyhq.com/<board>/<postingId>`.
///
/// The match may start anywhere in the input (no scheme required). `board` runs
/// up to the next `/`; `posting_id` stops at the next `/` or `?`. Both must be
/// non-empty. Returns `None` when no occurrence of the host yields a match.
pub fn parse_ashby_url(url: &str) -> Option<AshbyUrl> {
    let prefix = format!("{ASHBY_JOBS_HOST}/");

    url.match_indices(&prefix)
        .find_map(|(start, _)| parse_path(&url[start + prefix.len()..]))
}

fn parse_path(path: &str) -> Option<AshbyUrl> {
    let (board, rest) = path.split_once('/')?;
    if board.is_empty() {
        return None;
    }

    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    let posting_id = &rest[..end];
    if posting_id.is_empty() {
        return None;
    }

    Some(AshbyUrl {
        board: board.to_string(),
        posting_id: posting_id.to_string(),
    })
}
