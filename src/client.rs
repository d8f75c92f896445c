//! The JIRA client.
//!
//! One async method per supported JIRA operation. Every method is a single
//! stateless request/response round trip: the transport performs the HTTP
//! call and the result is mapped into a [`Resource`] or a typed view.
//! Failures surface to the caller verbatim; nothing is retried or
//! recovered locally.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::resource::{expand_path, Resource};
use crate::transport::Transport;
use crate::types::{
    Attachment, Comment, CommentPage, Component, CreatedIssue, FieldInfo, Issue, IssueLinkType,
    IssueLinkTypeList, IssueType, Priority, Project, Resolution, SearchResult, ServerInfo, Status,
    Transition, TransitionList, User, Version, Votes, Watchers, Worklog, WorklogPage,
};

/// JIRA limits a single search page to 100 issues.
const MAX_SEARCH_PAGE: u32 = 100;

/// A client for one JIRA instance.
///
/// Construct with [`Jira::new`] for anonymous access or
/// [`Jira::with_auth`] / [`Jira::basic_auth`] for authenticated access.
/// The client holds no state beyond its immutable configuration, so it is
/// safe to share across tasks and issue concurrent calls.
#[derive(Debug)]
pub struct Jira {
    transport: Transport,
}

impl Jira {
    /// Create an anonymous client for the given options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the options fail validation.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_auth(options, Auth::anonymous())
    }

    /// Create a client with explicit credentials.
    pub fn with_auth(options: ClientOptions, auth: Auth) -> Result<Self> {
        let transport = Transport::new(&options, auth)?;
        Ok(Self { transport })
    }

    /// Create a Basic-auth client for a server with default REST settings.
    pub fn basic_auth(server: &str, username: &str, token: &str) -> Result<Self> {
        Self::with_auth(ClientOptions::new(server), Auth::basic(username, token))
    }

    /// The server this client is connected to.
    pub fn server(&self) -> &str {
        self.transport.base_url()
    }

    // ---- universal resource loading ----

    /// Get a [`Resource`] for any addressable resource on the server.
    ///
    /// `template` is a path template of the form `resource`,
    /// `resource/{0}`, `resource/{0}/sub/{1}`, etc., with placeholders
    /// filled from `ids`. The return value is untyped, which makes this
    /// the escape hatch for resources this crate has no view for.
    #[instrument(skip(self))]
    pub async fn find(&self, template: &str, ids: &[&str]) -> Result<Resource> {
        let path = expand_path(template, ids)?;
        let value = self.transport.get(&path, None).await?;
        Ok(Resource::wrap(value))
    }

    // ---- myself ----

    /// Get the current authenticated user.
    ///
    /// Calls `GET /myself`. Doubles as a connection check: a reachable
    /// server with valid credentials is exactly what makes it succeed.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.get_as("myself", None).await
    }

    // ---- issues ----

    /// Get a single issue by key.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn issue(&self, key: &str) -> Result<Issue> {
        self.issue_with(key, None, None).await
    }

    /// Get an issue, restricting returned fields or expanding extras.
    ///
    /// `fields` and `expand` are comma-separated lists passed through to
    /// the server.
    pub async fn issue_with(
        &self,
        key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Issue> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(fields) = fields {
            params.push(("fields", fields.to_string()));
        }
        if let Some(expand) = expand {
            params.push(("expand", expand.to_string()));
        }

        let params = if params.is_empty() {
            None
        } else {
            Some(params.as_slice())
        };
        self.get_as(&format!("issue/{}", key), params).await
    }

    /// Create an issue and fetch it back in full.
    ///
    /// `fields` is the issue field map, e.g.
    /// `{"project": {"key": "PROJ"}, "summary": "...", "issuetype": {"name": "Bug"}}`.
    /// The creation response only carries id/key/self, so the new issue is
    /// re-fetched before returning.
    #[instrument(skip(self, fields))]
    pub async fn create_issue(&self, fields: Value) -> Result<Issue> {
        let body = json!({ "fields": fields });
        let value = self.transport.post("issue", Some(&body)).await?;
        let created: CreatedIssue = decode(value)?;

        debug!(key = %created.key, "Issue created");
        self.issue(&created.key).await
    }

    /// Update fields on an issue.
    ///
    /// Which fields are editable (and with what payload shape) is
    /// instance-specific; see [`editmeta`](Self::editmeta).
    #[instrument(skip(self, fields), fields(issue_key = %key))]
    pub async fn update_issue(&self, key: &str, fields: Value) -> Result<()> {
        let body = json!({ "fields": fields });
        self.transport
            .put(&format!("issue/{}", key), &body)
            .await?;
        Ok(())
    }

    /// Delete an issue.
    ///
    /// If the issue has subtasks, `delete_subtasks` must be `true` for the
    /// call to succeed.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn delete_issue(&self, key: &str, delete_subtasks: bool) -> Result<()> {
        let params = [("deleteSubtasks", delete_subtasks.to_string())];
        self.transport
            .delete(&format!("issue/{}", key), Some(&params))
            .await?;
        Ok(())
    }

    /// Assign an issue to a user.
    pub async fn assign_issue(&self, key: &str, assignee: &str) -> Result<()> {
        let body = json!({ "name": assignee });
        self.transport
            .put(&format!("issue/{}/assignee", key), &body)
            .await?;
        Ok(())
    }

    /// Get the edit metadata for an issue: which fields can be edited and
    /// with what allowed values. The shape is deeply instance-specific, so
    /// this returns an untyped [`Resource`].
    pub async fn editmeta(&self, key: &str) -> Result<Resource> {
        let value = self
            .transport
            .get(&format!("issue/{}/editmeta", key), None)
            .await?;
        Ok(Resource::wrap(value))
    }

    // ---- search ----

    /// Search for issues using JQL.
    ///
    /// # Arguments
    ///
    /// * `jql` - The JQL query string
    /// * `start_at` - The index of the first issue to return (0-based)
    /// * `max_results` - Maximum number of issues to return (capped at 100)
    ///
    /// Returns one page; use [`SearchResult::has_more`] and
    /// [`SearchResult::next_start`] to walk further pages.
    #[instrument(skip(self), fields(jql = %jql))]
    pub async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<SearchResult> {
        debug!(start_at, max_results, "Searching issues");

        let path = format!(
            "search?jql={}&startAt={}&maxResults={}",
            urlencoding::encode(jql),
            start_at,
            max_results.min(MAX_SEARCH_PAGE)
        );

        let result: SearchResult = self.get_as(&path, None).await?;
        debug!(
            found = result.issues.len(),
            total = result.total,
            "Search complete"
        );
        Ok(result)
    }

    // ---- comments ----

    /// Get the comments on an issue.
    pub async fn comments(&self, key: &str) -> Result<CommentPage> {
        self.get_as(&format!("issue/{}/comment", key), None).await
    }

    /// Get a single comment on an issue.
    pub async fn comment(&self, key: &str, comment_id: &str) -> Result<Comment> {
        self.get_as(&format!("issue/{}/comment/{}", key, comment_id), None)
            .await
    }

    /// Add a comment to an issue.
    #[instrument(skip(self, body), fields(issue_key = %key))]
    pub async fn add_comment(&self, key: &str, body: &str) -> Result<Comment> {
        let payload = json!({ "body": body });
        let value = self
            .transport
            .post(&format!("issue/{}/comment", key), Some(&payload))
            .await?;
        decode(value)
    }

    // ---- transitions ----

    /// Get the workflow transitions currently available for an issue.
    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let list: TransitionList = self
            .get_as(&format!("issue/{}/transitions", key), None)
            .await?;
        Ok(list.transitions)
    }

    /// Perform a workflow transition on an issue.
    ///
    /// `fields` optionally sets fields as part of the transition (e.g. a
    /// resolution), subject to the transition screen's rules.
    #[instrument(skip(self, fields), fields(issue_key = %key, transition_id = %transition_id))]
    pub async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        fields: Option<Value>,
    ) -> Result<()> {
        let mut body = json!({ "transition": { "id": transition_id } });
        if let Some(fields) = fields {
            body["fields"] = fields;
        }

        self.transport
            .post(&format!("issue/{}/transitions", key), Some(&body))
            .await?;
        Ok(())
    }

    // ---- votes ----

    /// Get vote information on an issue.
    pub async fn votes(&self, key: &str) -> Result<Votes> {
        self.get_as(&format!("issue/{}/votes", key), None).await
    }

    /// Register a vote for the current user on an issue.
    pub async fn add_vote(&self, key: &str) -> Result<()> {
        self.transport
            .post(&format!("issue/{}/votes", key), None)
            .await?;
        Ok(())
    }

    /// Remove the current user's vote from an issue.
    pub async fn remove_vote(&self, key: &str) -> Result<()> {
        self.transport
            .delete(&format!("issue/{}/votes", key), None)
            .await?;
        Ok(())
    }

    // ---- watchers ----

    /// Get watcher information on an issue.
    pub async fn watchers(&self, key: &str) -> Result<Watchers> {
        self.get_as(&format!("issue/{}/watchers", key), None).await
    }

    /// Add a user to an issue's watchers list.
    pub async fn add_watcher(&self, key: &str, username: &str) -> Result<()> {
        // The watchers endpoint takes the bare username as a JSON string.
        let body = Value::String(username.to_string());
        self.transport
            .post(&format!("issue/{}/watchers", key), Some(&body))
            .await?;
        Ok(())
    }

    /// Remove a user from an issue's watchers list.
    pub async fn remove_watcher(&self, key: &str, username: &str) -> Result<()> {
        let params = [("username", username.to_string())];
        self.transport
            .delete(&format!("issue/{}/watchers", key), Some(&params))
            .await?;
        Ok(())
    }

    // ---- worklogs ----

    /// Get the worklog entries on an issue.
    pub async fn worklogs(&self, key: &str) -> Result<WorklogPage> {
        self.get_as(&format!("issue/{}/worklog", key), None).await
    }

    /// Get a single worklog entry.
    pub async fn worklog(&self, key: &str, worklog_id: &str) -> Result<Worklog> {
        self.get_as(&format!("issue/{}/worklog/{}", key, worklog_id), None)
            .await
    }

    /// Log work on an issue.
    ///
    /// `time_spent` uses JIRA's duration syntax (e.g. "3h 20m").
    #[instrument(skip(self, comment), fields(issue_key = %key))]
    pub async fn add_worklog(
        &self,
        key: &str,
        time_spent: &str,
        comment: Option<&str>,
    ) -> Result<Worklog> {
        let mut body = json!({ "timeSpent": time_spent });
        if let Some(comment) = comment {
            body["comment"] = Value::String(comment.to_string());
        }

        let value = self
            .transport
            .post(&format!("issue/{}/worklog", key), Some(&body))
            .await?;
        decode(value)
    }

    // ---- issue links ----

    /// Create a link between two issues.
    ///
    /// `link_type` is the link type name (e.g. "Blocks"); directions are
    /// as defined by that type.
    pub async fn create_issue_link(
        &self,
        link_type: &str,
        inward_issue: &str,
        outward_issue: &str,
    ) -> Result<()> {
        let body = json!({
            "type": { "name": link_type },
            "inwardIssue": { "key": inward_issue },
            "outwardIssue": { "key": outward_issue },
        });
        self.transport.post("issueLink", Some(&body)).await?;
        Ok(())
    }

    /// Get an issue link by ID.
    pub async fn issue_link(&self, link_id: &str) -> Result<Resource> {
        let value = self
            .transport
            .get(&format!("issueLink/{}", link_id), None)
            .await?;
        Ok(Resource::wrap(value))
    }

    /// Get the issue link types defined on this server.
    pub async fn issue_link_types(&self) -> Result<Vec<IssueLinkType>> {
        let list: IssueLinkTypeList = self.get_as("issueLinkType", None).await?;
        Ok(list.issue_link_types)
    }

    // ---- projects ----

    /// Get all projects visible to the current user.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.get_as("project", None).await
    }

    /// Get a project by key or ID.
    pub async fn project(&self, key: &str) -> Result<Project> {
        self.get_as(&format!("project/{}", key), None).await
    }

    /// Get the components of a project.
    pub async fn project_components(&self, key: &str) -> Result<Vec<Component>> {
        self.get_as(&format!("project/{}/components", key), None)
            .await
    }

    /// Get the versions of a project.
    pub async fn project_versions(&self, key: &str) -> Result<Vec<Version>> {
        self.get_as(&format!("project/{}/versions", key), None)
            .await
    }

    /// Get the roles defined in a project, as a name-to-URL map.
    pub async fn project_roles(&self, key: &str) -> Result<Resource> {
        let value = self
            .transport
            .get(&format!("project/{}/role", key), None)
            .await?;
        Ok(Resource::wrap(value))
    }

    // ---- components & versions ----

    /// Get a component by ID.
    pub async fn component(&self, component_id: &str) -> Result<Component> {
        self.get_as(&format!("component/{}", component_id), None)
            .await
    }

    /// Create a component in a project.
    pub async fn create_component(
        &self,
        project: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Component> {
        let mut body = json!({ "name": name, "project": project });
        if let Some(description) = description {
            body["description"] = Value::String(description.to_string());
        }

        let value = self.transport.post("component", Some(&body)).await?;
        decode(value)
    }

    /// Get a project version by ID.
    pub async fn version(&self, version_id: &str) -> Result<Version> {
        self.get_as(&format!("version/{}", version_id), None).await
    }

    /// Create a version in a project.
    pub async fn create_version(
        &self,
        project: &str,
        name: &str,
        release_date: Option<&str>,
    ) -> Result<Version> {
        let mut body = json!({ "name": name, "project": project });
        if let Some(release_date) = release_date {
            body["releaseDate"] = Value::String(release_date.to_string());
        }

        let value = self.transport.post("version", Some(&body)).await?;
        decode(value)
    }

    // ---- users ----

    /// Get a user by username.
    pub async fn user(&self, username: &str) -> Result<User> {
        let path = format!("user?username={}", urlencoding::encode(username));
        self.get_as(&path, None).await
    }

    /// Search for users matching a query.
    pub async fn search_users(
        &self,
        query: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<Vec<User>> {
        let params = [
            ("username", query.to_string()),
            ("startAt", start_at.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        self.get_as("user/search", Some(&params)).await
    }

    /// Get groups, optionally filtered by a query string.
    pub async fn groups(&self, query: Option<&str>) -> Result<Resource> {
        let params;
        let params_ref = match query {
            Some(query) => {
                params = [("query", query.to_string())];
                Some(&params[..])
            }
            None => None,
        };

        let value = self.transport.get("groups/picker", params_ref).await?;
        Ok(Resource::wrap(value))
    }

    // ---- catalogs ----

    /// Get all priorities defined on this server.
    pub async fn priorities(&self) -> Result<Vec<Priority>> {
        self.get_as("priority", None).await
    }

    /// Get a priority by ID.
    pub async fn priority(&self, priority_id: &str) -> Result<Priority> {
        self.get_as(&format!("priority/{}", priority_id), None)
            .await
    }

    /// Get all resolutions defined on this server.
    pub async fn resolutions(&self) -> Result<Vec<Resolution>> {
        self.get_as("resolution", None).await
    }

    /// Get a resolution by ID.
    pub async fn resolution(&self, resolution_id: &str) -> Result<Resolution> {
        self.get_as(&format!("resolution/{}", resolution_id), None)
            .await
    }

    /// Get all statuses defined on this server.
    pub async fn statuses(&self) -> Result<Vec<Status>> {
        self.get_as("status", None).await
    }

    /// Get a status by ID or name.
    pub async fn status(&self, status_id: &str) -> Result<Status> {
        self.get_as(&format!("status/{}", status_id), None).await
    }

    /// Get all issue types defined on this server.
    pub async fn issue_types(&self) -> Result<Vec<IssueType>> {
        self.get_as("issuetype", None).await
    }

    /// Get an issue type by ID.
    pub async fn issue_type(&self, type_id: &str) -> Result<IssueType> {
        self.get_as(&format!("issuetype/{}", type_id), None).await
    }

    /// Get metadata for all issue fields, custom fields included.
    pub async fn fields(&self) -> Result<Vec<FieldInfo>> {
        self.get_as("field", None).await
    }

    // ---- server ----

    /// Get information about the JIRA server.
    pub async fn server_info(&self) -> Result<ServerInfo> {
        self.get_as("serverInfo", None).await
    }

    /// Get the server application properties, or a single one by key.
    pub async fn application_properties(&self, key: Option<&str>) -> Result<Resource> {
        let params;
        let params_ref = match key {
            Some(key) => {
                params = [("key", key.to_string())];
                Some(&params[..])
            }
            None => None,
        };

        let value = self
            .transport
            .get("application-properties", params_ref)
            .await?;
        Ok(Resource::wrap(value))
    }

    /// Get the current user's permissions, optionally in the context of a
    /// project.
    pub async fn my_permissions(&self, project_key: Option<&str>) -> Result<Resource> {
        let params;
        let params_ref = match project_key {
            Some(key) => {
                params = [("projectKey", key.to_string())];
                Some(&params[..])
            }
            None => None,
        };

        let value = self.transport.get("mypermissions", params_ref).await?;
        Ok(Resource::wrap(value))
    }

    /// Get attachment metadata by ID.
    pub async fn attachment(&self, attachment_id: &str) -> Result<Attachment> {
        self.get_as(&format!("attachment/{}", attachment_id), None)
            .await
    }

    // ---- plumbing ----

    /// GET a path and decode the response into a typed view.
    async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&[(&str, String)]>,
    ) -> Result<T> {
        let value = self.transport.get(path, params).await?;
        decode(value)
    }
}

/// Decode a JSON value into a typed view.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::Decode(format!("unexpected response shape: {}", e)))
}
