//! Command-line interface definitions and handlers.
//!
//! Argument structs use clap's derive API and convert into the core
//! parameter types from [`harbor_core::params`] via `From`, keeping clap
//! concerns out of the core (the parameter wrapper pattern). The [`Cli`]
//! handler at the bottom drives the coordinator and renders the resulting
//! display types to the terminal.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use harbor_core::params::{
    AddPrograms, AddTask, ChecklistStatus, CreateClient, Id, ListClients, RemoveProgram,
    SetDischargeDate, SetPlacementNotes, SetPlacementStatus, SetReferent, TaskRef, ToggleStep,
    WriteWeeklyUpdate,
};
use harbor_core::{
    Coordinator, CreateResult, OperationStatus, ProgramRef, ShortlistEntries, UpdateResult,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Client commands
// ============================================================================

/// Admit a new client and create their discharge plan
///
/// The plan starts with every checklist step incomplete and an empty
/// shortlist. The admission date anchors all checklist due dates.
#[derive(Args)]
pub struct CreateClientArgs {
    /// Client display name
    pub name: String,
    /// Admission date (YYYY-MM-DD)
    #[arg(long, help = "Admission date in YYYY-MM-DD form")]
    pub admission_date: String,
    /// Estimated discharge date (YYYY-MM-DD)
    #[arg(long, help = "Optional estimated discharge date in YYYY-MM-DD form")]
    pub discharge_date: Option<String>,
}

impl From<CreateClientArgs> for CreateClient {
    fn from(val: CreateClientArgs) -> Self {
        CreateClient {
            name: val.name,
            admission_date: val.admission_date,
            estimated_discharge_date: val.discharge_date,
        }
    }
}

/// List client plans
///
/// Shows active clients by default; discharged clients are preserved and
/// can be listed with --discharged.
#[derive(Args)]
pub struct ListClientsArgs {
    /// Show discharged clients instead of active ones
    #[arg(long, help = "Show discharged clients instead of active ones")]
    pub discharged: bool,
}

impl From<ListClientsArgs> for ListClients {
    fn from(val: ListClientsArgs) -> Self {
        ListClients {
            discharged: val.discharged,
        }
    }
}

/// Show a client's discharge-planning workspace
///
/// Displays the checklist evaluated against today's date (due, due-soon,
/// overdue and blocked annotations), the program shortlist, follow-up tasks
/// and the referent record. With --review, steps requiring weekly attention
/// are flagged and the weekly update fields are shown with staleness
/// markers.
#[derive(Args)]
pub struct ShowClientArgs {
    /// ID of the client to display
    #[arg(help = "Unique identifier of the client to show")]
    pub id: u64,
    /// Evaluate in review (case-meeting) mode
    #[arg(long, help = "Review mode: flag steps and fields needing weekly attention")]
    pub review: bool,
}

impl From<ShowClientArgs> for ChecklistStatus {
    fn from(val: ShowClientArgs) -> Self {
        ChecklistStatus {
            client_id: val.id,
            review: val.review,
        }
    }
}

/// Identify a client by ID
#[derive(Args)]
pub struct ClientIdArgs {
    /// ID of the client
    #[arg(help = "Unique identifier of the client")]
    pub id: u64,
}

impl From<ClientIdArgs> for Id {
    fn from(val: ClientIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Revise a client's estimated discharge date
#[derive(Args)]
pub struct SetDischargeDateArgs {
    /// ID of the client
    pub client_id: u64,
    /// New estimated discharge date (YYYY-MM-DD)
    pub date: String,
}

impl From<SetDischargeDateArgs> for SetDischargeDate {
    fn from(val: SetDischargeDateArgs) -> Self {
        SetDischargeDate {
            client_id: val.client_id,
            date: val.date,
        }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Admit a new client
    #[command(alias = "c")]
    Create(CreateClientArgs),
    /// List client plans
    #[command(aliases = ["l", "ls"])]
    List(ListClientsArgs),
    /// Show a client's workspace
    #[command(alias = "s")]
    Show(ShowClientArgs),
    /// Mark a client discharged
    #[command(alias = "d")]
    Discharge(ClientIdArgs),
    /// Restore a discharged client to active
    Reopen(ClientIdArgs),
    /// Revise the estimated discharge date
    SetDischargeDate(SetDischargeDateArgs),
}

// ============================================================================
// Checklist step commands
// ============================================================================

/// List a client's checklist with due-date annotations
#[derive(Args)]
pub struct StepListArgs {
    /// ID of the client
    pub client_id: u64,
    /// Evaluate in review (case-meeting) mode
    #[arg(long, help = "Review mode: flag steps needing weekly attention")]
    pub review: bool,
}

impl From<StepListArgs> for ChecklistStatus {
    fn from(val: StepListArgs) -> Self {
        ChecklistStatus {
            client_id: val.client_id,
            review: val.review,
        }
    }
}

/// Toggle a checklist step's completion state
///
/// Completing a step whose prerequisite is incomplete is rejected;
/// un-completing a step is always permitted and does not cascade to
/// dependents.
#[derive(Args)]
pub struct ToggleStepArgs {
    /// ID of the client
    pub client_id: u64,
    /// Step key, e.g. 'extensionScheduled' or 'family-review-session'
    #[arg(help = "Checklist step key, e.g. 'extensionScheduled'")]
    pub step: String,
}

impl From<ToggleStepArgs> for ToggleStep {
    fn from(val: ToggleStepArgs) -> Self {
        ToggleStep {
            client_id: val.client_id,
            step: val.step,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// List the checklist with due-date annotations
    #[command(aliases = ["l", "ls"])]
    List(StepListArgs),
    /// Toggle a step's completion state
    #[command(alias = "t")]
    Toggle(ToggleStepArgs),
}

// ============================================================================
// Shortlist commands
// ============================================================================

/// Add a candidate program to the shortlist
///
/// The program directory is external to Harbor: pass the resolved program id
/// and display name. Programs already on the shortlist are skipped and
/// reported.
#[derive(Args)]
pub struct AddProgramArgs {
    /// ID of the client
    pub client_id: u64,
    /// Identifier of the program in the directory
    pub program_id: String,
    /// Program display name, usually "Facility - Program"
    pub program_name: String,
}

impl From<AddProgramArgs> for AddPrograms {
    fn from(val: AddProgramArgs) -> Self {
        AddPrograms {
            client_id: val.client_id,
            programs: vec![ProgramRef {
                program_id: val.program_id,
                program_name: val.program_name,
            }],
        }
    }
}

/// Remove a program from the shortlist
#[derive(Args)]
pub struct RemoveProgramArgs {
    /// ID of the client
    pub client_id: u64,
    /// Identifier of the program to remove
    pub program_id: String,
}

impl From<RemoveProgramArgs> for RemoveProgram {
    fn from(val: RemoveProgramArgs) -> Self {
        RemoveProgram {
            client_id: val.client_id,
            program_id: val.program_id,
        }
    }
}

/// Change a shortlisted placement's status
#[derive(Args)]
pub struct PlacementStatusArgs {
    /// ID of the client
    pub client_id: u64,
    /// Identifier of the program on the shortlist
    pub program_id: String,
    /// New placement status
    #[arg(value_enum)]
    pub status: PlacementStatusArg,
}

impl From<PlacementStatusArgs> for SetPlacementStatus {
    fn from(val: PlacementStatusArgs) -> Self {
        SetPlacementStatus {
            client_id: val.client_id,
            program_id: val.program_id,
            status: val.status.to_string(),
        }
    }
}

/// Replace a shortlisted placement's notes
#[derive(Args)]
pub struct PlacementNotesArgs {
    /// ID of the client
    pub client_id: u64,
    /// Identifier of the program on the shortlist
    pub program_id: String,
    /// Replacement notes text
    pub notes: String,
}

impl From<PlacementNotesArgs> for SetPlacementNotes {
    fn from(val: PlacementNotesArgs) -> Self {
        SetPlacementNotes {
            client_id: val.client_id,
            program_id: val.program_id,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum ShortlistCommands {
    /// List the shortlist
    #[command(aliases = ["l", "ls"])]
    List(ClientIdArgs),
    /// Add a candidate program
    #[command(alias = "a")]
    Add(AddProgramArgs),
    /// Remove a program
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveProgramArgs),
    /// Change a placement's status
    #[command(alias = "s")]
    Status(PlacementStatusArgs),
    /// Replace a placement's notes
    #[command(alias = "n")]
    Notes(PlacementNotesArgs),
}

/// Command-line argument representation of placement status values
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum PlacementStatusArg {
    /// Program is being vetted
    Vetting,
    /// Presented to the family
    PresentedToFamily,
    /// Application submitted
    ApplicationSubmitted,
    /// Placement confirmed
    Confirmed,
    /// Declined
    Declined,
    /// On the waitlist
    Waitlisted,
}

impl std::fmt::Display for PlacementStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementStatusArg::Vetting => write!(f, "Vetting"),
            PlacementStatusArg::PresentedToFamily => write!(f, "Presented to Family"),
            PlacementStatusArg::ApplicationSubmitted => write!(f, "Application Submitted"),
            PlacementStatusArg::Confirmed => write!(f, "Confirmed"),
            PlacementStatusArg::Declined => write!(f, "Declined"),
            PlacementStatusArg::Waitlisted => write!(f, "Waitlisted"),
        }
    }
}

// ============================================================================
// Weekly update commands
// ============================================================================

/// Write one weekly case-review update field
///
/// The field text and its freshness timestamp are stamped together; a field
/// not updated within 7 days is flagged at the next review.
#[derive(Args)]
pub struct WeeklySetArgs {
    /// ID of the client
    pub client_id: u64,
    /// Which field to write
    #[arg(value_enum)]
    pub field: WeeklyFieldArg,
    /// Replacement field text
    pub text: String,
}

impl From<WeeklySetArgs> for WriteWeeklyUpdate {
    fn from(val: WeeklySetArgs) -> Self {
        WriteWeeklyUpdate {
            client_id: val.client_id,
            field: val.field.to_string(),
            text: val.text,
        }
    }
}

#[derive(Subcommand)]
pub enum WeeklyCommands {
    /// Write one weekly update field
    #[command(alias = "s")]
    Set(WeeklySetArgs),
    /// Show what needs attention at this week's review
    #[command(alias = "r")]
    Review(ClientIdArgs),
}

/// Command-line argument representation of weekly update fields
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum WeeklyFieldArg {
    /// This week's progress
    Progress,
    /// Current obstacles
    Obstacles,
    /// Next week's plan
    NextWeekPlan,
    /// Family communication (informational only)
    FamilyUpdates,
}

impl std::fmt::Display for WeeklyFieldArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeeklyFieldArg::Progress => write!(f, "weeklyProgress"),
            WeeklyFieldArg::Obstacles => write!(f, "weeklyObstacles"),
            WeeklyFieldArg::NextWeekPlan => write!(f, "nextWeekPlan"),
            WeeklyFieldArg::FamilyUpdates => write!(f, "familyUpdates"),
        }
    }
}

// ============================================================================
// Task commands
// ============================================================================

/// Add a follow-up task
#[derive(Args)]
pub struct AddTaskArgs {
    /// ID of the client
    pub client_id: u64,
    /// Task text
    pub text: String,
    /// Task priority
    #[arg(short, long, value_enum)]
    pub priority: Option<TaskPriorityArg>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            client_id: val.client_id,
            text: val.text,
            priority: val.priority.map(|p| p.to_string()),
        }
    }
}

/// Identify a task within a client plan
#[derive(Args)]
pub struct TaskRefArgs {
    /// ID of the client
    pub client_id: u64,
    /// ID of the task within the plan
    pub task_id: u64,
}

impl From<TaskRefArgs> for TaskRef {
    fn from(val: TaskRefArgs) -> Self {
        TaskRef {
            client_id: val.client_id,
            task_id: val.task_id,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a follow-up task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Toggle a task's completion flag
    #[command(alias = "t")]
    Toggle(TaskRefArgs),
    /// Remove a task
    #[command(aliases = ["r", "rm"])]
    Remove(TaskRefArgs),
}

/// Command-line argument representation of task priorities
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum TaskPriorityArg {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for TaskPriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriorityArg::High => write!(f, "high"),
            TaskPriorityArg::Medium => write!(f, "medium"),
            TaskPriorityArg::Low => write!(f, "low"),
        }
    }
}

// ============================================================================
// Referent commands
// ============================================================================

/// Update the referent contact record field by field
///
/// Only the flags you pass are written; everything else keeps its current
/// value.
#[derive(Args)]
pub struct SetReferentArgs {
    /// ID of the client
    pub client_id: u64,
    /// Referent display name
    #[arg(long)]
    pub name: Option<String>,
    /// Referent type, e.g. 'Therapist' or 'Educational Consultant'
    #[arg(long = "type")]
    pub referent_type: Option<String>,
    /// Role in aftercare, e.g. 'Leading Aftercare'
    #[arg(long)]
    pub role: Option<String>,
    /// Date of the most recent contact (YYYY-MM-DD)
    #[arg(long)]
    pub last_contact: Option<String>,
    /// Date of the next planned contact (YYYY-MM-DD)
    #[arg(long)]
    pub next_contact: Option<String>,
}

impl From<SetReferentArgs> for SetReferent {
    fn from(val: SetReferentArgs) -> Self {
        SetReferent {
            client_id: val.client_id,
            name: val.name,
            referent_type: val.referent_type,
            role: val.role,
            last_contact_date: val.last_contact,
            next_contact_date: val.next_contact,
        }
    }
}

#[derive(Subcommand)]
pub enum ReferentCommands {
    /// Update referent fields
    #[command(alias = "s")]
    Set(SetReferentArgs),
}

// ============================================================================
// Command handlers
// ============================================================================

/// Command handler that drives the coordinator and renders results.
pub struct Cli {
    coordinator: Coordinator,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(coordinator: Coordinator, renderer: TerminalRenderer) -> Self {
        Self {
            coordinator,
            renderer,
        }
    }

    /// Handle `harbor client ...` commands.
    pub async fn handle_client_command(&self, command: ClientCommands) -> Result<()> {
        match command {
            ClientCommands::Create(args) => {
                let plan = self.coordinator.create_client_result(&args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            ClientCommands::List(args) => self.list_clients(&args.into()).await,
            ClientCommands::Show(args) => {
                let params: ChecklistStatus = args.into();
                match self.coordinator.client_workspace(&params).await? {
                    Some(workspace) => self.renderer.render(&workspace.to_string()),
                    None => anyhow::bail!("Client with ID {} not found", params.client_id),
                }
            }
            ClientCommands::Discharge(args) => {
                let params: Id = args.into();
                match self.coordinator.discharge_client_result(&params).await? {
                    Some(plan) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Discharged {} (ID {}). Use 'client reopen' to restore.",
                            plan.name, plan.id
                        ))
                        .to_string(),
                    ),
                    None => anyhow::bail!("Client with ID {} not found", params.id),
                }
            }
            ClientCommands::Reopen(args) => {
                let params: Id = args.into();
                match self.coordinator.reopen_client_result(&params).await? {
                    Some(plan) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Reopened {} (ID {}). Plan is active again.",
                            plan.name, plan.id
                        ))
                        .to_string(),
                    ),
                    None => anyhow::bail!("Client with ID {} not found", params.id),
                }
            }
            ClientCommands::SetDischargeDate(args) => {
                let plan = self.coordinator.set_discharge_date(&args.into()).await?;
                let changes = vec![format!(
                    "Estimated discharge set to {}",
                    plan.estimated_discharge_date
                        .map(|d| d.to_string())
                        .unwrap_or_default()
                )];
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
        }
    }

    /// Handle `harbor step ...` commands.
    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::List(args) => {
                let params: ChecklistStatus = args.into();
                match self.coordinator.checklist_status(&params).await? {
                    Some(states) => {
                        let output = format!("# Planning Checklist\n\n{states}");
                        self.renderer.render(&output)
                    }
                    None => anyhow::bail!("Client with ID {} not found", params.client_id),
                }
            }
            StepCommands::Toggle(args) => {
                let result = self.coordinator.toggle_step(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    /// Handle `harbor shortlist ...` commands.
    pub async fn handle_shortlist_command(&self, command: ShortlistCommands) -> Result<()> {
        match command {
            ShortlistCommands::List(args) => {
                let params: Id = args.into();
                match self.coordinator.get_client(&params).await? {
                    Some(plan) => {
                        let output = format!(
                            "# Shortlist — {}\n\n{}",
                            plan.name,
                            ShortlistEntries(plan.shortlist)
                        );
                        self.renderer.render(&output)
                    }
                    None => anyhow::bail!("Client with ID {} not found", params.id),
                }
            }
            ShortlistCommands::Add(args) => {
                let result = self.coordinator.add_programs(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            ShortlistCommands::Remove(args) => {
                let params: RemoveProgram = args.into();
                let program_id = params.program_id.clone();
                self.coordinator.remove_program(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Removed '{program_id}' from the shortlist."
                    ))
                    .to_string(),
                )
            }
            ShortlistCommands::Status(args) => {
                let params: SetPlacementStatus = args.into();
                let plan = self.coordinator.set_placement_status(&params).await?;
                let changes = vec![format!(
                    "'{}' status set to {}",
                    params.program_id, params.status
                )];
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            ShortlistCommands::Notes(args) => {
                let params: SetPlacementNotes = args.into();
                self.coordinator.set_placement_notes(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Updated notes for '{}'.",
                        params.program_id
                    ))
                    .to_string(),
                )
            }
        }
    }

    /// Handle `harbor weekly ...` commands.
    pub async fn handle_weekly_command(&self, command: WeeklyCommands) -> Result<()> {
        match command {
            WeeklyCommands::Set(args) => {
                let params: WriteWeeklyUpdate = args.into();
                let field = params.validate()?;
                self.coordinator.write_weekly_update(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Updated '{}'.", field.label())).to_string(),
                )
            }
            WeeklyCommands::Review(args) => {
                let params: Id = args.into();
                match self.coordinator.weekly_review(&params).await? {
                    Some(report) => self.renderer.render(&report.to_string()),
                    None => anyhow::bail!("Client with ID {} not found", params.id),
                }
            }
        }
    }

    /// Handle `harbor task ...` commands.
    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let plan = self.coordinator.add_task(&args.into()).await?;
                let message = match plan.tasks.last() {
                    Some(task) => format!("Added task #{}: {}", task.id, task.text),
                    None => "Added task".to_string(),
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            TaskCommands::Toggle(args) => {
                let params: TaskRef = args.into();
                let plan = self.coordinator.toggle_task(&params).await?;
                let completed = plan
                    .tasks
                    .iter()
                    .find(|task| task.id == params.task_id)
                    .is_some_and(|task| task.completed);
                let state = if completed { "complete" } else { "incomplete" };
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Marked task #{} {state}.",
                        params.task_id
                    ))
                    .to_string(),
                )
            }
            TaskCommands::Remove(args) => {
                let params: TaskRef = args.into();
                self.coordinator.remove_task(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Removed task #{}.", params.task_id))
                        .to_string(),
                )
            }
        }
    }

    /// Handle `harbor referent ...` commands.
    pub async fn handle_referent_command(&self, command: ReferentCommands) -> Result<()> {
        match command {
            ReferentCommands::Set(args) => {
                let params: SetReferent = args.into();
                let mut changes = Vec::new();
                if params.name.is_some() {
                    changes.push("Updated name".to_string());
                }
                if params.referent_type.is_some() {
                    changes.push("Updated type".to_string());
                }
                if params.role.is_some() {
                    changes.push("Updated role".to_string());
                }
                if params.last_contact_date.is_some() {
                    changes.push("Updated last contact date".to_string());
                }
                if params.next_contact_date.is_some() {
                    changes.push("Updated next contact date".to_string());
                }

                let plan = self.coordinator.set_referent(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
        }
    }

    /// List clients (also the default action when no command is given).
    pub async fn list_clients(&self, params: &ListClients) -> Result<()> {
        let summaries = self.coordinator.list_clients_summary(params).await?;

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

        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }
}
