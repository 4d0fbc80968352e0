//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for aftercare coordination
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "weekly-review".to_string(),
            description: "Run a weekly discharge-planning review for a client".to_string(),
            template: r#"You are assisting a clinical case worker with a weekly discharge-planning review.

# Client
Client ID: {client_id}

# Your Task
Walk through this client's plan and surface everything the team must act on this week.

## Step 1: Pull the Workspace
Call `show_client` with review=true to get the checklist in review mode, the shortlist, and the weekly update fields with staleness markers.

## Step 2: Check the Checklist
Call `weekly_review` for the distilled report, then for each item needing attention:
- **Overdue steps**: name the step, how many days overdue, and the concrete unblock action
- **Blocked steps**: name the prerequisite holding them up
- **Recurring-review steps**: confirm with the case worker whether progress was made

Steps form a dependency chain; only the earliest incomplete step is usually actionable. Don't suggest completing a step whose prerequisite is incomplete - it will be rejected.

## Step 3: Refresh the Weekly Updates
For each stale field, ask the case worker for the current state and record it with `write_weekly_update`:
- weeklyProgress: what moved forward this week
- weeklyObstacles: what is in the way
- nextWeekPlan: concrete goals for next week
- familyUpdates: family conversations (optional, record if offered)

## Step 4: Review the Shortlist
- Any placement stuck in 'Vetting' for multiple weeks? Ask what is pending.
- If a placement is 'Confirmed', check that intake-date and handoff checklist steps are moving.
- Record status changes with `set_placement_status` and context with `set_placement_notes`.

## Step 5: Capture Follow-ups
Create a task with `add_task` for every action item that came out of the review, with a realistic priority.

## Output
Finish with a short summary: checklist position (percentage and current actionable step), placement status, and the follow-up list."#.to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "client_id".to_string(),
                    description: "The ID of the client to review".to_string(),
                    required: true,
                },
            ],
        },
        PromptTemplate {
            name: "discharge-planning".to_string(),
            description: "Set up discharge planning for a newly admitted client".to_string(),
            template: r#"You are assisting a clinical case worker with setting up discharge planning for a newly admitted client.

# Client
Name: {name}
Admission date: {admission_date}

# Your Task

## Step 1: Create the Plan
Call `create_client` with the name and admission date. The discharge checklist is created automatically with every step incomplete; due dates are computed from the admission date.

## Step 2: Explain the Road Ahead
Call `show_client` and walk the case worker through the checklist chain:
1. Extension Call Scheduled (due day 14)
2. Extension Email Sent (day 15)
3. Aftercare Thread Launched (day 16)
4. Initial Options Vetted (day 21)
5. Family Review Session (day 28)
6. Connecting Emails Sent (day 30)
7. Final Program Confirmed (day 35)
8. Intake Date Secured (day 37)
9. Warm Handoff Completed (day 42)
10. Kipu Updated (day 43)

Each step gates the next - they must be completed in order with `toggle_step`.

## Step 3: Record the Referent
Ask who referred the client and capture it with `set_referent` (name, type, role in aftercare, contact dates).

## Step 4: Seed Early Work
- If candidate aftercare programs are already known, add them with `add_to_shortlist`.
- Create `add_task` entries for immediate follow-ups (records requests, insurance verification, family scheduling).
- If an estimated discharge date is known, record it with `set_discharge_date`.

## Output
Summarize the created plan: ID, checklist due dates for the first two weeks, and any seeded shortlist entries or tasks."#.to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "name".to_string(),
                    description: "Client display name".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "admission_date".to_string(),
                    description: "Admission date in YYYY-MM-DD form".to_string(),
                    required: true,
                },
            ],
        },
    ]
}
