// Prompt text for salary prediction. Pure string rendering: same posting in,
// byte-identical prompt out.

use posting::JobPosting;

const NOT_AVAILABLE: &str = "N/A";

const PREAMBLE: &str = "You are a compensation analyst. Predict the salary for this role.";

const NO_COMPENSATION: &str = "No compensation listed.";

/// Instruction block appended after the posting details.
const RESPONSE_INSTRUCTIONS: &str = "Respond with:
1. **Predicted Salary Range** (min – max USD)
2. **Best Estimate** (single number)
3. **Explanation** — justify based on role level, location, skills, industry benchmarks.

Be specific and data-driven. Keep it concise.";

/// Renders the prediction prompt for a posting. Never fails; absent fields
/// render as `N/A`.
pub fn build_prompt(posting: &JobPosting) -> String {
    let compensation = match posting.compensation_summary() {
        Some(summary) => format!("Listed Compensation: {summary}"),
        None => NO_COMPENSATION.to_string(),
    };

    format!(
        "{PREAMBLE}

Title: {title}
Department: {department}
Team: {team}
Location: {location}
Employment Type: {employment_type}
Remote: {remote}
{compensation}

Description:
{description}

{RESPONSE_INSTRUCTIONS}",
        title = posting.title,
        department = posting.department().unwrap_or(NOT_AVAILABLE),
        team = posting.team().unwrap_or(NOT_AVAILABLE),
        location = posting.location().unwrap_or(NOT_AVAILABLE),
        employment_type = posting.employment_type().unwrap_or(NOT_AVAILABLE),
        remote = if posting.remote() { "Yes" } else { "No" },
        description = posting.description().unwrap_or(NOT_AVAILABLE),
    )
}
