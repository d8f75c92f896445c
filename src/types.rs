//! Typed views of JIRA REST resources.
//!
//! Each type models the fields a given endpoint is expected to return.
//! Servers add fields over time and instances carry custom fields, so
//! every struct keeps a flattened `extra` map: whatever the schema here
//! does not name is preserved verbatim instead of dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A JIRA user.
///
/// Returned by `GET /myself`, `GET /user` and embedded in issue fields.
/// Cloud identifies users by `accountId`, Server/Data Center by `name`;
/// both are optional here so either variant parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's account ID (JIRA Cloud).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// The username (JIRA Server/Data Center).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The user's display name.
    pub display_name: String,
    /// The user's email address (may be hidden by privacy settings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Whether the user is active.
    #[serde(default = "default_true")]
    pub active: bool,
    /// The user's timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// URLs for the user's avatar images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_urls: Option<AvatarUrls>,
    /// Fields not modelled here, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Avatar URLs for a user or project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarUrls {
    /// 48x48 pixel avatar.
    #[serde(rename = "48x48", default, skip_serializing_if = "Option::is_none")]
    pub size_48: Option<String>,
    /// 32x32 pixel avatar.
    #[serde(rename = "32x32", default, skip_serializing_if = "Option::is_none")]
    pub size_32: Option<String>,
    /// 24x24 pixel avatar.
    #[serde(rename = "24x24", default, skip_serializing_if = "Option::is_none")]
    pub size_24: Option<String>,
    /// 16x16 pixel avatar.
    #[serde(rename = "16x16", default, skip_serializing_if = "Option::is_none")]
    pub size_16: Option<String>,
}

/// Search result from a JQL query.
///
/// Returned by `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of matching issues.
    pub total: u32,
    /// The list of issues, in server order.
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.start_at + (self.issues.len() as u32) < self.total
    }

    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at + self.issues.len() as u32
    }
}

/// A JIRA issue.
///
/// Returned by `GET /issue/{key}` or as part of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// URL of this issue resource on the server.
    #[serde(rename = "self")]
    pub self_url: String,
    /// The issue fields.
    pub fields: IssueFields,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the issue status name, if the status field was returned.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if the field was returned.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the issue priority name, if set.
    pub fn priority(&self) -> Option<&str> {
        self.fields.priority.as_ref().map(|p| p.name.as_str())
    }

    /// Get the assignee display name, if assigned.
    pub fn assignee(&self) -> Option<&str> {
        self.fields.assignee.as_ref().map(|a| a.display_name.as_str())
    }

    /// Get the reporter display name, if set.
    pub fn reporter(&self) -> Option<&str> {
        self.fields.reporter.as_ref().map(|r| r.display_name.as_str())
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.assignee().unwrap_or("Unassigned")
    }

    /// Get the priority name, or "None" if not set.
    pub fn priority_name(&self) -> &str {
        self.priority().unwrap_or("None")
    }

    /// Get the project key, if available.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// Get the description as plain text, or empty string if not set.
    ///
    /// Handles both plain string descriptions (REST API v2) and Atlassian
    /// Document Format (v3).
    pub fn description_text(&self) -> String {
        self.fields
            .description
            .as_ref()
            .map(|d| {
                if let Ok(doc) = serde_json::from_value::<AtlassianDoc>(d.clone()) {
                    doc.to_plain_text()
                } else if let Some(s) = d.as_str() {
                    s.to_string()
                } else {
                    String::new()
                }
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
///
/// Every field is optional or defaulted: which ones the server actually
/// returns depends on the `fields` query parameter and the instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
    /// The issue description (plain string in v2, ADF document in v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// The issue status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// The issue type (Bug, Story, Task, etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuetype: Option<IssueType>,
    /// The issue priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// The resolution, once the issue is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// The issue assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// The issue reporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
    /// The project this issue belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Components the issue is associated with.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Versions this issue is fixed in.
    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Vec<Version>,
    /// When the issue was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// When the issue was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// When the issue is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duedate: Option<String>,
    /// Everything else, custom fields included.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IssueFields {
    /// Look up a custom field (or any unmodelled field) by key.
    pub fn custom_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// The minimal body JIRA returns when an issue is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// The new issue's ID.
    pub id: String,
    /// The new issue's key.
    pub key: String,
    /// URL of the new issue resource.
    #[serde(rename = "self")]
    pub self_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Issue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// The status ID.
    pub id: String,
    /// The status name (e.g., "To Do", "In Progress", "Done").
    pub name: String,
    /// The status category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    /// The category ID.
    pub id: u32,
    /// The category key.
    pub key: String,
    /// The category name.
    pub name: String,
    /// The category color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
}

/// Issue type (Bug, Story, Task, Epic, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    /// The issue type ID.
    pub id: String,
    /// The issue type name.
    pub name: String,
    /// Whether this is a subtask type.
    #[serde(default)]
    pub subtask: bool,
    /// The issue type description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Issue priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    /// The priority ID.
    pub id: String,
    /// The priority name (e.g., "Highest", "High", "Medium", "Low").
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A resolution for an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// The resolution ID.
    pub id: String,
    /// The resolution name (e.g., "Fixed", "Won't Fix").
    pub name: String,
    /// The resolution description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A JIRA project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// The project ID.
    pub id: String,
    /// The project key (e.g., "PROJ").
    pub key: String,
    /// The project name.
    pub name: String,
    /// The project lead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<User>,
    /// URLs for the project's avatar images.
    #[serde(default, rename = "avatarUrls", skip_serializing_if = "Option::is_none")]
    pub avatar_urls: Option<AvatarUrls>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.name)
    }
}

/// A project component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// The component ID.
    pub id: String,
    /// The component name.
    pub name: String,
    /// The component description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A version of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// The version ID.
    pub id: String,
    /// The version name.
    pub name: String,
    /// Whether the version has been archived.
    #[serde(default)]
    pub archived: bool,
    /// Whether the version has been released.
    #[serde(default)]
    pub released: bool,
    /// The planned release date.
    #[serde(default, rename = "releaseDate", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// The comment ID.
    pub id: String,
    /// The comment body (plain string in v2, ADF document in v3).
    pub body: Value,
    /// The user who authored the comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// When the comment was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// When the comment was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// URL of this comment resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    /// Get the comment body as plain text.
    pub fn body_text(&self) -> String {
        if let Ok(doc) = serde_json::from_value::<AtlassianDoc>(self.body.clone()) {
            doc.to_plain_text()
        } else if let Some(s) = self.body.as_str() {
            s.to_string()
        } else {
            String::new()
        }
    }
}

/// One page of comments on an issue.
///
/// Returned by `GET /issue/{key}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of comments.
    pub total: u32,
    /// The comments on this page, in server order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentPage {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        self.start_at + (self.comments.len() as u32) < self.total
    }

    /// Get the starting index for the next page.
    pub fn next_start(&self) -> u32 {
        self.start_at + self.comments.len() as u32
    }
}

/// A workflow transition currently available for an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// The transition ID.
    pub id: String,
    /// The transition name (e.g., "Start Progress").
    pub name: String,
    /// The status the issue ends up in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Status>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wrapper the transitions endpoint returns around its list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionList {
    /// The available transitions.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Vote information on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Votes {
    /// URL of this votes resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Number of votes.
    pub votes: u32,
    /// Whether the current user has voted.
    #[serde(default)]
    pub has_voted: bool,
    /// The voters, when requested.
    #[serde(default)]
    pub voters: Vec<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Watcher information on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchers {
    /// URL of this watchers resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Number of watchers.
    pub watch_count: u32,
    /// Whether the current user is watching.
    #[serde(default)]
    pub is_watching: bool,
    /// The watchers themselves.
    #[serde(default)]
    pub watchers: Vec<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A worklog entry on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    /// The worklog ID.
    pub id: String,
    /// Who logged the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// An optional comment on the work done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
    /// When the work was started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    /// Time spent, as entered (e.g., "3h 20m").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<String>,
    /// Time spent in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of worklog entries.
///
/// Returned by `GET /issue/{key}/worklog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPage {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of worklog entries.
    #[serde(default)]
    pub total: u32,
    /// The entries on this page.
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A type of link between two issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLinkType {
    /// The link type ID.
    pub id: String,
    /// The link type name (e.g., "Blocks").
    pub name: String,
    /// Description of the inward direction (e.g., "is blocked by").
    pub inward: String,
    /// Description of the outward direction (e.g., "blocks").
    pub outward: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wrapper the issue link types endpoint returns around its list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkTypeList {
    /// The defined link types.
    #[serde(default)]
    pub issue_link_types: Vec<IssueLinkType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An issue attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The attachment ID.
    pub id: String,
    /// The file name.
    pub filename: String,
    /// Who attached the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// When the file was attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// File size in bytes.
    #[serde(default)]
    pub size: u64,
    /// The MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// URL the file contents can be downloaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata about an issue field, custom fields included.
///
/// Returned by `GET /field`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInfo {
    /// The field ID (e.g., "summary", "customfield_10016").
    pub id: String,
    /// The field's display name.
    pub name: String,
    /// Whether this is a custom field.
    #[serde(default)]
    pub custom: bool,
    /// Whether the field can be used in JQL `ORDER BY`.
    #[serde(default)]
    pub orderable: bool,
    /// Whether the field can be searched on.
    #[serde(default)]
    pub searchable: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Information about the JIRA server itself.
///
/// Returned by `GET /serverInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// The server base URL.
    pub base_url: String,
    /// The JIRA version string.
    pub version: String,
    /// The version split into numeric components.
    #[serde(default)]
    pub version_numbers: Vec<u32>,
    /// The build number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<u64>,
    /// The configured server title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Atlassian Document Format (ADF) content.
///
/// JIRA's v3 API uses ADF for rich text fields like descriptions and
/// comments. This struct represents the document structure and extracts
/// plain text for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlassianDoc {
    /// The document type (always "doc" for root documents).
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The document version (typically 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// The content nodes within the document.
    #[serde(default)]
    pub content: Vec<Value>,
}

impl AtlassianDoc {
    /// Convert ADF content to plain text.
    ///
    /// Recursively extracts text nodes from the document structure,
    /// preserving basic formatting like paragraphs and line breaks.
    pub fn to_plain_text(&self) -> String {
        let mut result = String::new();
        for node in &self.content {
            Self::extract_text(node, &mut result);
        }
        result.trim().to_string()
    }

    fn extract_text(node: &Value, result: &mut String) {
        let obj = match node {
            Value::Object(obj) => obj,
            Value::Array(items) => {
                for item in items {
                    Self::extract_text(item, result);
                }
                return;
            }
            _ => return,
        };

        let recurse_content = |result: &mut String| {
            if let Some(Value::Array(items)) = obj.get("content") {
                for item in items {
                    Self::extract_text(item, result);
                }
            }
        };

        match obj.get("type").and_then(|t| t.as_str()) {
            Some("text") => {
                if let Some(text) = obj.get("text").and_then(|t| t.as_str()) {
                    result.push_str(text);
                }
            }
            Some("paragraph") | Some("heading") => {
                recurse_content(result);
                if !result.ends_with('\n') && !result.is_empty() {
                    result.push('\n');
                }
            }
            Some("hardBreak") => {
                result.push('\n');
            }
            Some("listItem") => {
                result.push_str("• ");
                recurse_content(result);
            }
            Some("codeBlock") => {
                recurse_content(result);
                if !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            Some("blockquote") => {
                result.push_str("> ");
                recurse_content(result);
            }
            Some("mention") => {
                if let Some(text) = obj
                    .get("attrs")
                    .and_then(|a| a.get("text"))
                    .and_then(|t| t.as_str())
                {
                    result.push('@');
                    result.push_str(text);
                }
            }
            Some("emoji") => {
                if let Some(shortname) = obj
                    .get("attrs")
                    .and_then(|a| a.get("shortName"))
                    .and_then(|s| s.as_str())
                {
                    result.push_str(shortname);
                }
            }
            // Media and card nodes have no useful text representation.
            Some("inlineCard") | Some("mediaGroup") | Some("mediaSingle") => {}
            _ => recurse_content(result),
        }
    }
}

impl Default for AtlassianDoc {
    fn default() -> Self {
        Self {
            doc_type: "doc".to_string(),
            version: Some(1),
            content: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_issue(key: &str) -> Issue {
        serde_json::from_value(json!({
            "id": "10001",
            "key": key,
            "self": format!("https://example.com/rest/api/2/issue/{}", key),
            "fields": {"summary": "Test"}
        }))
        .unwrap()
    }

    #[test]
    fn test_search_result_has_more() {
        // First page: start=0, got 50 issues, total is 100 -> has more
        let mut result: SearchResult = serde_json::from_value(json!({
            "startAt": 0, "maxResults": 50, "total": 100, "issues": []
        }))
        .unwrap();
        result.issues = (0..50).map(|_| minimal_issue("TEST-1")).collect();
        assert!(result.has_more());
        assert_eq!(result.next_start(), 50);

        // Last page: start=50, got 50 issues, total is 100 -> no more
        result.start_at = 50;
        assert!(!result.has_more());

        // Partial last page: start=90, got 10 issues, total is 100 -> no more
        result.start_at = 90;
        result.issues.truncate(10);
        assert!(!result.has_more());
    }

    #[test]
    fn test_parse_minimal_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://company.atlassian.net/rest/api/2/issue/10001",
            "fields": {
                "summary": "Test issue",
                "status": {"id": "1", "name": "To Do"},
                "issuetype": {"id": "10001", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-123");
        assert_eq!(issue.summary(), "Test issue");
        assert_eq!(issue.status(), Some("To Do"));
        assert_eq!(issue.issue_type(), Some("Bug"));
        assert!(issue.priority().is_none());
        assert!(issue.assignee().is_none());
    }

    #[test]
    fn test_parse_full_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://company.atlassian.net/rest/api/2/issue/10001",
            "fields": {
                "summary": "Test issue with full fields",
                "status": {
                    "id": "1",
                    "name": "In Progress",
                    "statusCategory": {
                        "id": 4,
                        "key": "indeterminate",
                        "name": "In Progress",
                        "colorName": "yellow"
                    }
                },
                "issuetype": {"id": "10001", "name": "Story", "subtask": false},
                "priority": {"id": "2", "name": "High"},
                "resolution": {"id": "1", "name": "Fixed"},
                "assignee": {"accountId": "abc123", "displayName": "John Doe", "active": true},
                "reporter": {"accountId": "def456", "displayName": "Jane Smith", "active": true},
                "project": {"id": "10000", "key": "PROJ", "name": "My Project"},
                "labels": ["frontend", "urgent"],
                "components": [{"id": "10001", "name": "UI"}],
                "fixVersions": [{"id": "10100", "name": "1.2.0", "released": false}],
                "created": "2024-01-15T10:00:00.000+0000",
                "updated": "2024-01-16T14:30:00.000+0000"
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.summary(), "Test issue with full fields");
        assert_eq!(issue.status(), Some("In Progress"));
        assert_eq!(issue.issue_type(), Some("Story"));
        assert_eq!(issue.priority(), Some("High"));
        assert_eq!(issue.assignee(), Some("John Doe"));
        assert_eq!(issue.reporter(), Some("Jane Smith"));
        assert_eq!(issue.fields.labels, vec!["frontend", "urgent"]);
        assert_eq!(issue.fields.components.len(), 1);
        assert_eq!(issue.fields.fix_versions[0].name, "1.2.0");
        assert_eq!(issue.project_key(), Some("PROJ"));
        assert_eq!(issue.fields.resolution.as_ref().unwrap().name, "Fixed");
    }

    #[test]
    fn test_parse_issue_with_null_fields() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {
                "summary": "Test issue",
                "description": null,
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"id": "1", "name": "Bug"},
                "priority": null,
                "assignee": null,
                "reporter": null,
                "project": null,
                "labels": [],
                "components": []
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.priority().is_none());
        assert!(issue.assignee().is_none());
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.priority_name(), "None");
        assert_eq!(issue.description_text(), "");
    }

    #[test]
    fn test_custom_fields_preserved_in_extra() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {
                "summary": "Test",
                "customfield_10016": 5.0,
                "customfield_10020": [{"name": "Sprint 4"}]
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(
            issue.fields.custom_field("customfield_10016"),
            Some(&json!(5.0))
        );

        // Unknown fields must survive re-serialization.
        let back = serde_json::to_value(&issue).unwrap();
        assert_eq!(back["fields"]["customfield_10016"], json!(5.0));
        assert_eq!(back["fields"]["customfield_10020"][0]["name"], "Sprint 4");
    }

    #[test]
    fn test_parse_cloud_user() {
        let json = r#"{
            "accountId": "abc123",
            "displayName": "Test User",
            "emailAddress": "test@example.com",
            "active": true,
            "timeZone": "America/New_York"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.account_id.as_deref(), Some("abc123"));
        assert_eq!(user.display_name, "Test User");
        assert!(user.active);
        assert!(user.name.is_none());
    }

    #[test]
    fn test_parse_server_user() {
        // Server/DC identifies users by name rather than accountId.
        let json = r#"{"name": "jdoe", "displayName": "John Doe"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name.as_deref(), Some("jdoe"));
        assert!(user.account_id.is_none());
        assert!(user.active);
    }

    #[test]
    fn test_parse_search_result() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 50,
            "total": 2,
            "issues": [
                {
                    "id": "10001",
                    "key": "PROJ-1",
                    "self": "https://example.com/rest/api/2/issue/10001",
                    "fields": {"summary": "First issue"}
                },
                {
                    "id": "10002",
                    "key": "PROJ-2",
                    "self": "https://example.com/rest/api/2/issue/10002",
                    "fields": {"summary": "Second issue"}
                }
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].key, "PROJ-1");
        assert_eq!(result.issues[1].key, "PROJ-2");
        assert!(!result.has_more());
    }

    #[test]
    fn test_issue_display() {
        let issue = minimal_issue("TEST-1");
        assert_eq!(format!("{}", issue), "TEST-1: Test");
    }

    #[test]
    fn test_comment_page() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 50,
            "total": 1,
            "comments": [
                {
                    "id": "10001",
                    "body": "Plain text comment",
                    "author": {"accountId": "abc123", "displayName": "Test User"},
                    "created": "2024-01-15T10:00:00.000+0000"
                }
            ]
        }"#;

        let page: CommentPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 1);
        assert!(!page.has_more());
        assert_eq!(page.comments[0].body_text(), "Plain text comment");
    }

    #[test]
    fn test_comment_with_adf_body() {
        let json = r#"{
            "id": "10001",
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "This is a comment."}]}
                ]
            },
            "author": {"accountId": "abc123", "displayName": "John Doe"}
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.body_text(), "This is a comment.");
        assert_eq!(comment.author.as_ref().unwrap().display_name, "John Doe");
    }

    #[test]
    fn test_parse_transitions() {
        let json = r#"{
            "expand": "transitions",
            "transitions": [
                {"id": "11", "name": "Start Progress", "to": {"id": "3", "name": "In Progress"}},
                {"id": "21", "name": "Done", "to": {"id": "5", "name": "Done"}}
            ]
        }"#;

        let list: TransitionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.transitions.len(), 2);
        assert_eq!(list.transitions[0].name, "Start Progress");
        assert_eq!(list.transitions[0].to.as_ref().unwrap().name, "In Progress");
    }

    #[test]
    fn test_parse_votes() {
        let json = r#"{
            "self": "https://example.com/rest/api/2/issue/JRA-9/votes",
            "votes": 3,
            "hasVoted": true
        }"#;

        let votes: Votes = serde_json::from_str(json).unwrap();
        assert_eq!(votes.votes, 3);
        assert!(votes.has_voted);
        assert!(votes.voters.is_empty());
    }

    #[test]
    fn test_parse_watchers() {
        let json = r#"{
            "watchCount": 2,
            "isWatching": false,
            "watchers": [
                {"name": "jdoe", "displayName": "John Doe"},
                {"name": "jsmith", "displayName": "Jane Smith"}
            ]
        }"#;

        let watchers: Watchers = serde_json::from_str(json).unwrap();
        assert_eq!(watchers.watch_count, 2);
        assert!(!watchers.is_watching);
        assert_eq!(watchers.watchers.len(), 2);
    }

    #[test]
    fn test_parse_worklog_page() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 20,
            "total": 1,
            "worklogs": [
                {
                    "id": "100028",
                    "author": {"name": "jdoe", "displayName": "John Doe"},
                    "started": "2024-01-17T09:00:00.000+0000",
                    "timeSpent": "3h 20m",
                    "timeSpentSeconds": 12000
                }
            ]
        }"#;

        let page: WorklogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.worklogs.len(), 1);
        assert_eq!(page.worklogs[0].time_spent.as_deref(), Some("3h 20m"));
        assert_eq!(page.worklogs[0].time_spent_seconds, Some(12000));
    }

    #[test]
    fn test_parse_issue_link_types() {
        let json = r#"{
            "issueLinkTypes": [
                {"id": "10000", "name": "Blocks", "inward": "is blocked by", "outward": "blocks"}
            ]
        }"#;

        let list: IssueLinkTypeList = serde_json::from_str(json).unwrap();
        assert_eq!(list.issue_link_types[0].outward, "blocks");
    }

    #[test]
    fn test_parse_server_info() {
        let json = r#"{
            "baseUrl": "https://company.atlassian.net",
            "version": "9.4.0",
            "versionNumbers": [9, 4, 0],
            "buildNumber": 940000,
            "serverTitle": "Company JIRA"
        }"#;

        let info: ServerInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.version, "9.4.0");
        assert_eq!(info.version_numbers, vec![9, 4, 0]);
        assert_eq!(info.server_title.as_deref(), Some("Company JIRA"));
    }

    #[test]
    fn test_parse_field_info() {
        let json = r#"[
            {"id": "summary", "name": "Summary", "custom": false, "orderable": true, "searchable": true},
            {"id": "customfield_10016", "name": "Story Points", "custom": true}
        ]"#;

        let fields: Vec<FieldInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(!fields[0].custom);
        assert!(fields[1].custom);
    }

    #[test]
    fn test_issue_with_adf_description() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {
                "summary": "Test issue",
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "This is the description."}]}
                    ]
                }
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.description_text(), "This is the description.");
    }

    #[test]
    fn test_issue_with_plain_description() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {"summary": "Test", "description": "Plain v2 description"}
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.description_text(), "Plain v2 description");
    }

    #[test]
    fn test_atlassian_doc_simple_paragraph() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "Hello, world!"}]}
            ]
        }"#;

        let doc: AtlassianDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.to_plain_text(), "Hello, world!");
    }

    #[test]
    fn test_atlassian_doc_multiple_paragraphs() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "First paragraph."}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Second paragraph."}]}
            ]
        }"#;

        let doc: AtlassianDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.to_plain_text(), "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_atlassian_doc_bullet_list() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "bulletList",
                    "content": [
                        {
                            "type": "listItem",
                            "content": [
                                {"type": "paragraph", "content": [{"type": "text", "text": "Item one"}]}
                            ]
                        },
                        {
                            "type": "listItem",
                            "content": [
                                {"type": "paragraph", "content": [{"type": "text", "text": "Item two"}]}
                            ]
                        }
                    ]
                }
            ]
        }"#;

        let doc: AtlassianDoc = serde_json::from_str(json).unwrap();
        let text = doc.to_plain_text();
        assert!(text.contains("• Item one"));
        assert!(text.contains("• Item two"));
    }

    #[test]
    fn test_atlassian_doc_hard_break() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "paragraph",
                    "content": [
                        {"type": "text", "text": "Line one"},
                        {"type": "hardBreak"},
                        {"type": "text", "text": "Line two"}
                    ]
                }
            ]
        }"#;

        let doc: AtlassianDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.to_plain_text(), "Line one\nLine two");
    }

    #[test]
    fn test_atlassian_doc_mention() {
        let json = r#"{
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "paragraph",
                    "content": [
                        {"type": "text", "text": "Hello "},
                        {"type": "mention", "attrs": {"id": "abc123", "text": "John Doe"}},
                        {"type": "text", "text": "!"}
                    ]
                }
            ]
        }"#;

        let doc: AtlassianDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.to_plain_text(), "Hello @John Doe!");
    }

    #[test]
    fn test_atlassian_doc_empty() {
        let doc = AtlassianDoc::default();
        assert_eq!(doc.to_plain_text(), "");
    }
}
