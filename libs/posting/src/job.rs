use serde::{Deserialize, Serialize};

/// A single job listing as returned by the Ashby posting API.
///
/// Only the fields the predictor reads are modelled; anything else the
/// upstream returns is dropped on deserialization. `title` is the one
/// required field, so a body without it is rejected at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// Upstream identifier, used only to match a posting inside its board listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_plain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation: Option<Compensation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation_tier_summary: Option<String>,
}

/// Treats `None` and `""` alike.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl JobPosting {
    pub fn department(&self) -> Option<&str> {
        non_empty(&self.department)
    }

    pub fn team(&self) -> Option<&str> {
        non_empty(&self.team)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    pub fn employment_type(&self) -> Option<&str> {
        non_empty(&self.employment_type)
    }

    pub fn remote(&self) -> bool {
        self.is_remote.unwrap_or(false)
    }

    pub fn compensation_summary(&self) -> Option<&str> {
        self.compensation
            .as_ref()
            .and_then(|c| non_empty(&c.compensation_tier_summary))
    }

    /// Plain-text description, falling back to the HTML source.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description_plain).or_else(|| non_empty(&self.description_html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_upstream_shape_and_ignores_unknown_fields() {
        let json = r#"{
            "id": "e3cb621a",
            "title": "Staff Engineer",
            "department": "Engineering",
            "team": "Platform",
            "location": "Toronto",
            "employmentType": "FullTime",
            "isRemote": true,
            "descriptionPlain": "Build things.",
            "descriptionHtml": "<p>Build things.</p>",
            "publishedAt": "2025-01-01T00:00:00Z",
            "jobUrl": "https://jobs.ashbyhq.com/cohere/e3cb621a",
            "compensation": {
                "compensationTierSummary": "$200K – $250K",
                "summaryComponents": []
            }
        }"#;

        let posting: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.id.as_deref(), Some("e3cb621a"));
        assert_eq!(posting.title, "Staff Engineer");
        assert_eq!(posting.employment_type(), Some("FullTime"));
        assert!(posting.remote());
        assert_eq!(posting.compensation_summary(), Some("$200K – $250K"));
        assert_eq!(posting.description(), Some("Build things."));
    }

    #[test]
    fn test_title_is_required() {
        let result = serde_json::from_str::<JobPosting>(r#"{"department": "Sales"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let posting = JobPosting {
            title: "Analyst".to_string(),
            department: Some(String::new()),
            description_plain: Some(String::new()),
            description_html: Some("<p>html</p>".to_string()),
            compensation: Some(Compensation {
                compensation_tier_summary: Some(String::new()),
            }),
            ..Default::default()
        };

        assert_eq!(posting.department(), None);
        assert_eq!(posting.compensation_summary(), None);
        assert_eq!(posting.description(), Some("<p>html</p>"));
    }

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let posting = JobPosting {
            title: "Designer".to_string(),
            employment_type: Some("PartTime".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "Designer", "employmentType": "PartTime"})
        );
    }
}
