//! MCP tool handlers implementation

use std::sync::Arc;

use harbor_core::{
    display::{CreateResult, OperationStatus, ShortlistEntries},
    params as core, Coordinator,
};
use log::debug;
use rmcp::{
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Wraps any core parameter type in a transparent serde container, adding
/// the MCP-specific derives (Deserialize, JsonSchema) without polluting the
/// core types with framework dependencies.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreateClient = McpParams<core::CreateClient>;
pub type ListClients = McpParams<core::ListClients>;
pub type ChecklistStatus = McpParams<core::ChecklistStatus>;
pub type ToggleStep = McpParams<core::ToggleStep>;
pub type SetDischargeDate = McpParams<core::SetDischargeDate>;
pub type AddPrograms = McpParams<core::AddPrograms>;
pub type RemoveProgram = McpParams<core::RemoveProgram>;
pub type SetPlacementStatus = McpParams<core::SetPlacementStatus>;
pub type SetPlacementNotes = McpParams<core::SetPlacementNotes>;
pub type WriteWeeklyUpdate = McpParams<core::WriteWeeklyUpdate>;
pub type AddTask = McpParams<core::AddTask>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type SetReferent = McpParams<core::SetReferent>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    coordinator: Arc<Mutex<Coordinator>>,
}

impl McpHandlers {
    pub fn new(coordinator: Arc<Mutex<Coordinator>>) -> Self {
        Self { coordinator }
    }

    fn client_not_found(id: u64) -> ErrorData {
        ErrorData::internal_error(format!("Client with ID {id} not found"), None)
    }

    pub async fn create_client(&self, params: &core::CreateClient) -> McpResult {
        debug!("create_client: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .create_client_result(params)
            .await
            .map_err(|e| to_mcp_error("Failed to admit client", &e))?;

        let result = CreateResult::new(plan);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn list_clients(&self, params: &core::ListClients) -> McpResult {
        debug!("list_clients: {:?}", params);

        let summaries = self
            .coordinator
            .lock()
            .await
            .list_clients_summary(params)
            .await
            .map_err(|e| to_mcp_error("Failed to list clients", &e))?;

        let title = if summaries.is_empty() {
            if params.discharged {
                "No discharged clients found"
            } else {
                "No active clients found"
            }
        } else if params.discharged {
            "Discharged Clients"
        } else {
            "Active Clients"
        };

        let result = format!("# {}\n\n{}", title, summaries);
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_client(&self, params: &core::ChecklistStatus) -> McpResult {
        debug!("show_client: {:?}", params);

        let workspace = self
            .coordinator
            .lock()
            .await
            .client_workspace(params)
            .await
            .map_err(|e| to_mcp_error("Failed to get client", &e))?
            .ok_or_else(|| Self::client_not_found(params.client_id))?;

        Ok(CallToolResult::success(vec![Content::text(
            workspace.to_string(),
        )]))
    }

    pub async fn toggle_step(&self, params: &core::ToggleStep) -> McpResult {
        debug!("toggle_step: {:?}", params);

        let result = self
            .coordinator
            .lock()
            .await
            .toggle_step(params)
            .await
            .map_err(|e| to_mcp_error("Failed to toggle step", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn set_discharge_date(&self, params: &core::SetDischargeDate) -> McpResult {
        debug!("set_discharge_date: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .set_discharge_date(params)
            .await
            .map_err(|e| to_mcp_error("Failed to set discharge date", &e))?;

        let result = OperationStatus::success(format!(
            "Estimated discharge for {} set to {}.",
            plan.name, params.date
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn add_to_shortlist(&self, params: &core::AddPrograms) -> McpResult {
        debug!("add_to_shortlist: {:?}", params);

        let result = self
            .coordinator
            .lock()
            .await
            .add_programs(params)
            .await
            .map_err(|e| to_mcp_error("Failed to add programs", &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn remove_from_shortlist(&self, params: &core::RemoveProgram) -> McpResult {
        debug!("remove_from_shortlist: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .remove_program(params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove program", &e))?;

        let result = format!(
            "Removed '{}' from the shortlist.\n\n{}",
            params.program_id,
            ShortlistEntries(plan.shortlist)
        );
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn set_placement_status(&self, params: &core::SetPlacementStatus) -> McpResult {
        debug!("set_placement_status: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .set_placement_status(params)
            .await
            .map_err(|e| to_mcp_error("Failed to set placement status", &e))?;

        let result = format!(
            "Set '{}' to {}.\n\n{}",
            params.program_id,
            params.status,
            ShortlistEntries(plan.shortlist)
        );
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn set_placement_notes(&self, params: &core::SetPlacementNotes) -> McpResult {
        debug!("set_placement_notes: {:?}", params);

        self.coordinator
            .lock()
            .await
            .set_placement_notes(params)
            .await
            .map_err(|e| to_mcp_error("Failed to set placement notes", &e))?;

        let result =
            OperationStatus::success(format!("Updated notes for '{}'.", params.program_id));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn write_weekly_update(&self, params: &core::WriteWeeklyUpdate) -> McpResult {
        debug!("write_weekly_update: {:?}", params);

        let field = params
            .validate()
            .map_err(|e| to_mcp_error("Invalid weekly update field", &e))?;

        self.coordinator
            .lock()
            .await
            .write_weekly_update(params)
            .await
            .map_err(|e| to_mcp_error("Failed to write weekly update", &e))?;

        let result = OperationStatus::success(format!("Updated '{}'.", field.label()));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn weekly_review(&self, params: &core::Id) -> McpResult {
        debug!("weekly_review: {:?}", params);

        let report = self
            .coordinator
            .lock()
            .await
            .weekly_review(params)
            .await
            .map_err(|e| to_mcp_error("Failed to build review report", &e))?
            .ok_or_else(|| Self::client_not_found(params.id))?;

        Ok(CallToolResult::success(vec![Content::text(
            report.to_string(),
        )]))
    }

    pub async fn add_task(&self, params: &core::AddTask) -> McpResult {
        debug!("add_task: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .add_task(params)
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        let message = match plan.tasks.last() {
            Some(task) => format!("Added task #{}: {}", task.id, task.text),
            None => "Added task".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(
            OperationStatus::success(message).to_string(),
        )]))
    }

    pub async fn toggle_task(&self, params: &core::TaskRef) -> McpResult {
        debug!("toggle_task: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .toggle_task(params)
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?;

        let completed = plan
            .tasks
            .iter()
            .find(|task| task.id == params.task_id)
            .is_some_and(|task| task.completed);
        let state = if completed { "complete" } else { "incomplete" };
        let result =
            OperationStatus::success(format!("Marked task #{} {state}.", params.task_id));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn set_referent(&self, params: &core::SetReferent) -> McpResult {
        debug!("set_referent: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .set_referent(params)
            .await
            .map_err(|e| to_mcp_error("Failed to update referent", &e))?;

        let result = OperationStatus::success(format!(
            "Updated referent record for {} (ID {}).",
            plan.name, plan.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn discharge_client(&self, params: &core::Id) -> McpResult {
        debug!("discharge_client: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .discharge_client_result(params)
            .await
            .map_err(|e| to_mcp_error("Failed to discharge client", &e))?
            .ok_or_else(|| Self::client_not_found(params.id))?;

        let result = OperationStatus::success(format!(
            "Discharged {} (ID {}). Use 'reopen_client' to restore.",
            plan.name, plan.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn reopen_client(&self, params: &core::Id) -> McpResult {
        debug!("reopen_client: {:?}", params);

        let plan = self
            .coordinator
            .lock()
            .await
            .reopen_client_result(params)
            .await
            .map_err(|e| to_mcp_error("Failed to reopen client", &e))?
            .ok_or_else(|| Self::client_not_found(params.id))?;

        let result = OperationStatus::success(format!(
            "Reopened {} (ID {}). Plan is active again.",
            plan.name, plan.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(ErrorData::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(ErrorData::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(ErrorData::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
