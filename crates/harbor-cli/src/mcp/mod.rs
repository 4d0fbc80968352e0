//! MCP server implementation for Harbor
//!
//! This module implements the Model Context Protocol server for Harbor,
//! providing a standardized interface for AI assistants to work a client's
//! discharge plan: checklist, shortlist, weekly updates, tasks and the
//! referent record.

use std::sync::Arc;

use anyhow::Result;
use harbor_core::Coordinator;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use errors::to_mcp_error;
// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    AddPrograms, AddTask, ChecklistStatus, CreateClient, Id, ListClients, McpResult,
    RemoveProgram, SetDischargeDate, SetPlacementNotes, SetPlacementStatus, SetReferent, TaskRef,
    ToggleStep, WriteWeeklyUpdate,
};

/// MCP server for Harbor
#[derive(Clone)]
pub struct HarborMcpServer {
    coordinator: Arc<Mutex<Coordinator>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HarborMcpServer {
    /// Create a new Harbor MCP server
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.coordinator.clone())
    }

    #[tool(
        name = "create_client",
        description = "Admit a new client and create their discharge plan. Provide the client name and admission date (YYYY-MM-DD); the admission date anchors every checklist due date. The plan starts with all ten checklist steps incomplete and an empty shortlist. Returns the new client ID."
    )]
    async fn create_client(&self, params: Parameters<CreateClient>) -> McpResult {
        self.handlers().create_client(params.0.as_ref()).await
    }

    #[tool(
        name = "list_clients",
        description = "List client plans. Use discharged=false (default) for active clients, or discharged=true for discharged ones. Returns each client's checklist progress, shortlist size and whether a placement is confirmed."
    )]
    async fn list_clients(&self, params: Parameters<ListClients>) -> McpResult {
        self.handlers().list_clients(params.0.as_ref()).await
    }

    #[tool(
        name = "show_client",
        description = "Display a client's full discharge-planning workspace: the checklist with due/overdue/blocked annotations, the program shortlist with statuses, follow-up tasks and the referent record. Set review=true during a case-review meeting to flag steps and weekly update fields needing attention."
    )]
    async fn show_client(&self, params: Parameters<ChecklistStatus>) -> McpResult {
        self.handlers().show_client(params.0.as_ref()).await
    }

    #[tool(
        name = "toggle_step",
        description = "Toggle a discharge checklist step's completion state. Steps form a dependency chain and must be completed in order: completing a step whose prerequisite is incomplete is rejected. Un-completing a step is always permitted. Step keys: extensionScheduled, emailSent, aftercareThreadLaunched, initialOptionsVetted, familyReviewSession, connectingEmailsSent, finalProgramConfirmed, intakeDateSecured, warmHandoffCompleted, kipuUpdated."
    )]
    async fn toggle_step(&self, params: Parameters<ToggleStep>) -> McpResult {
        self.handlers().toggle_step(params.0.as_ref()).await
    }

    #[tool(
        name = "set_discharge_date",
        description = "Revise a client's estimated discharge date (YYYY-MM-DD)."
    )]
    async fn set_discharge_date(&self, params: Parameters<SetDischargeDate>) -> McpResult {
        self.handlers().set_discharge_date(params.0.as_ref()).await
    }

    #[tool(
        name = "add_to_shortlist",
        description = "Add candidate aftercare programs to a client's shortlist. Each program needs an id and a display name (resolved from the program directory). Programs already on the shortlist are skipped and reported; new entries start in 'Vetting' status with empty notes."
    )]
    async fn add_to_shortlist(&self, params: Parameters<AddPrograms>) -> McpResult {
        self.handlers().add_to_shortlist(params.0.as_ref()).await
    }

    #[tool(
        name = "remove_from_shortlist",
        description = "Remove a program from a client's shortlist. This is a hard delete with no tombstone - the program can be re-added later."
    )]
    async fn remove_from_shortlist(&self, params: Parameters<RemoveProgram>) -> McpResult {
        self.handlers()
            .remove_from_shortlist(params.0.as_ref())
            .await
    }

    #[tool(
        name = "set_placement_status",
        description = "Change a shortlisted placement's status. Valid statuses: 'Vetting', 'Presented to Family', 'Application Submitted', 'Confirmed', 'Declined', 'Waitlisted'. Status changes are entirely user-driven: confirming one placement never changes the others."
    )]
    async fn set_placement_status(&self, params: Parameters<SetPlacementStatus>) -> McpResult {
        self.handlers()
            .set_placement_status(params.0.as_ref())
            .await
    }

    #[tool(
        name = "set_placement_notes",
        description = "Replace the notes on a shortlisted placement."
    )]
    async fn set_placement_notes(&self, params: Parameters<SetPlacementNotes>) -> McpResult {
        self.handlers().set_placement_notes(params.0.as_ref()).await
    }

    #[tool(
        name = "write_weekly_update",
        description = "Write one of the four weekly case-review fields: 'weeklyProgress', 'weeklyObstacles', 'nextWeekPlan' or 'familyUpdates'. The field's freshness timestamp is stamped together with the text; fields not updated within 7 days are flagged at review."
    )]
    async fn write_weekly_update(&self, params: Parameters<WriteWeeklyUpdate>) -> McpResult {
        self.handlers().write_weekly_update(params.0.as_ref()).await
    }

    #[tool(
        name = "weekly_review",
        description = "Build the weekly review report for a client: checklist steps requiring recurring attention and weekly update fields that are unset or stale (7+ days old)."
    )]
    async fn weekly_review(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().weekly_review(params.0.as_ref()).await
    }

    #[tool(
        name = "add_task",
        description = "Add a follow-up task to a client plan. Optional priority: 'high', 'medium' (default) or 'low'."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params.0.as_ref()).await
    }

    #[tool(
        name = "toggle_task",
        description = "Toggle a follow-up task's completion flag by its id within the plan."
    )]
    async fn toggle_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().toggle_task(params.0.as_ref()).await
    }

    #[tool(
        name = "set_referent",
        description = "Update the client's referent contact record field by field. Only provided fields are written. Types: 'Educational Consultant', 'Therapist', 'Psychiatrist', 'Probation Officer', 'Family Friend', 'Other'. Roles: 'Leading Aftercare', 'Handling Options', 'Both', 'Observing'."
    )]
    async fn set_referent(&self, params: Parameters<SetReferent>) -> McpResult {
        self.handlers().set_referent(params.0.as_ref()).await
    }

    #[tool(
        name = "discharge_client",
        description = "Mark a client discharged. A status transition, not a deletion: the plan is preserved and can be restored with reopen_client."
    )]
    async fn discharge_client(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().discharge_client(params.0.as_ref()).await
    }

    #[tool(
        name = "reopen_client",
        description = "Restore a discharged client's plan to active."
    )]
    async fn reopen_client(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().reopen_client(params.0.as_ref()).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HarborMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "harbor".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Harbor is an aftercare coordination system that tracks each client's discharge plan from admission to warm handoff.

## Core Concepts
- **Client plan**: one document per client holding the planning checklist, program shortlist, follow-up tasks, weekly updates and the referent record
- **Checklist**: ten fixed steps forming a dependency chain (extension call → email → aftercare thread → options vetting → family review → connecting emails → program confirmed → intake date → warm handoff → Kipu updated), each with a due date offset from admission
- **Shortlist**: candidate aftercare programs under consideration, each with a placement status (Vetting → ... → Confirmed/Declined/Waitlisted)

## Workflow Examples

### Admitting a Client
1. Create the plan with `create_client` (name + admission date)
2. Record the referral source with `set_referent`
3. Review due dates with `show_client`

### Working the Checklist
1. Complete steps in chain order with `toggle_step` - completing a step whose prerequisite is incomplete is rejected
2. Watch for overdue and due-soon annotations in `show_client`
3. Blocked steps show which prerequisite they are waiting for

### Managing Placements
- Add candidates with `add_to_shortlist` (duplicates are skipped and reported)
- Track progress with `set_placement_status` and `set_placement_notes`
- Confirming a placement never auto-resolves competing entries - update each explicitly

### Weekly Case Review
1. Call `weekly_review` (or `show_client` with review=true) to see what needs attention
2. Refresh stale fields with `write_weekly_update` - fields older than 7 days are flagged
3. Capture action items with `add_task`

## Tool Categories
- **Clients**: create_client, list_clients, show_client, set_discharge_date, discharge_client, reopen_client
- **Checklist**: toggle_step
- **Shortlist**: add_to_shortlist, remove_from_shortlist, set_placement_status, set_placement_notes
- **Review**: weekly_review, write_weekly_update
- **Tasks & contacts**: add_task, toggle_task, set_referent"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: HarborMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Harbor MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
