//! Discharge checklist evaluation engine.
//!
//! Pure functions over the fixed step table in [`crate::models::checklist`]
//! and a client's [`ProgressMap`]. Nothing here touches the clock or the
//! store: `today` is always injected, so identical inputs produce identical
//! outputs.

use jiff::civil::Date;

use crate::error::{CoordinatorError, Result};
use crate::models::{checklist_steps, ProgressMap, StepDefinition, StepKey, StepState};

/// Steps due within this many days count as "due soon".
const DUE_SOON_WINDOW_DAYS: i32 = 3;

/// Whole days elapsed since admission.
///
/// An admission date in the future is treated as zero days elapsed: nothing
/// can be overdue before the client has been admitted. (The upstream
/// behavior for this edge was unspecified; Harbor pins it here.)
pub fn days_since_admission(admission: Date, today: Date) -> i32 {
    let days = (today - admission).get_days() as i32;
    days.max(0)
}

/// Evaluate every checklist step for one client.
///
/// Returns one [`StepState`] per step, in definition order. A step is
/// blocked while its prerequisite is incomplete; blocked and completed steps
/// are never overdue or due-soon, and overdue and due-soon are mutually
/// exclusive. With `review_mode` on, incomplete steps whose definition
/// requires recurring review are flagged for attention.
pub fn evaluate(
    admission: Date,
    progress: &ProgressMap,
    review_mode: bool,
    today: Date,
) -> Vec<StepState> {
    let elapsed = days_since_admission(admission, today);

    checklist_steps()
        .iter()
        .map(|def| {
            let completed = is_done(progress, def.key);
            let blocked = def
                .depends_on
                .is_some_and(|dep| !is_done(progress, dep));
            let days_left = def.due_after_days - elapsed;
            let actionable = !completed && !blocked;

            StepState {
                key: def.key,
                completed,
                blocked,
                overdue: actionable && days_left < 0,
                due_soon: actionable && (0..=DUE_SOON_WINDOW_DAYS).contains(&days_left),
                needs_recurring_attention: review_mode
                    && def.requires_recurring_review
                    && !completed,
                days_left,
            }
        })
        .collect()
}

/// Toggle one step's completion state, enforcing dependency gating.
///
/// Completing a step fails with [`CoordinatorError::BlockedStep`] while its
/// prerequisite is incomplete; un-completing is always permitted and does
/// not cascade to dependents (a dependent marked complete stays complete
/// even when its prerequisite is toggled back off — preserved upstream
/// behavior).
pub fn toggle(key: StepKey, progress: &ProgressMap) -> Result<ProgressMap> {
    let currently_done = is_done(progress, key);

    if !currently_done {
        if let Some(dep) = key.definition().depends_on {
            if !is_done(progress, dep) {
                return Err(CoordinatorError::BlockedStep {
                    step: key,
                    depends_on: dep,
                });
            }
        }
    }

    let mut next = progress.clone();
    next.insert(key, !currently_done);
    Ok(next)
}

/// Checklist completion percentage over the fixed step count.
///
/// Blocked steps still count toward the denominator: the percentage always
/// measures progress against the whole checklist.
pub fn completion_percentage(progress: &ProgressMap) -> f64 {
    let done = progress.values().filter(|v| **v).count();
    done as f64 / total_steps() as f64 * 100.0
}

/// Number of steps in the fixed checklist.
pub fn total_steps() -> usize {
    checklist_steps().len()
}

/// Validate that step definitions form a single acyclic chain.
///
/// Every dependency must reference a step declared earlier in the table and
/// keys must be unique. The shipped table always passes; the check guards
/// against future edits breaking the chain invariant.
pub fn validate_chain() -> Result<()> {
    validate_definitions(checklist_steps())
}

fn validate_definitions(defs: &[StepDefinition]) -> Result<()> {
    let mut seen: Vec<StepKey> = Vec::with_capacity(defs.len());

    for def in defs {
        if seen.contains(&def.key) {
            return Err(CoordinatorError::Configuration {
                message: format!("duplicate checklist step '{}'", def.key),
            });
        }
        if let Some(dep) = def.depends_on {
            if !seen.contains(&dep) {
                return Err(CoordinatorError::Configuration {
                    message: format!(
                        "checklist step '{}' depends on '{dep}', which is not an earlier step",
                        def.key
                    ),
                });
            }
        }
        seen.push(def.key);
    }

    Ok(())
}

fn is_done(progress: &ProgressMap, key: StepKey) -> bool {
    progress.get(&key).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::StepPriority;

    fn day(offset: i32) -> Date {
        // Admission anchor used throughout: 2025-03-01.
        date(2025, 3, 1)
            .checked_add(jiff::Span::new().days(offset as i64))
            .expect("valid date")
    }

    fn admission() -> Date {
        day(0)
    }

    fn progress_of(entries: &[(StepKey, bool)]) -> ProgressMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn evaluate_preserves_definition_order() {
        let states = evaluate(admission(), &ProgressMap::new(), false, day(0));
        assert_eq!(states.len(), total_steps());
        let keys: Vec<StepKey> = states.iter().map(|s| s.key).collect();
        let expected: Vec<StepKey> = checklist_steps().iter().map(|d| d.key).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn future_admission_counts_as_day_zero() {
        assert_eq!(days_since_admission(day(10), day(0)), 0);

        let states = evaluate(day(10), &ProgressMap::new(), false, day(0));
        let first = &states[0];
        assert!(!first.overdue);
        assert_eq!(first.days_left, 14);
    }

    #[test]
    fn toggle_rejects_blocked_step() {
        // emailSent depends on extensionScheduled.
        let progress = ProgressMap::new();
        let err = toggle(StepKey::EmailSent, &progress).unwrap_err();
        match err {
            CoordinatorError::BlockedStep { step, depends_on } => {
                assert_eq!(step, StepKey::EmailSent);
                assert_eq!(depends_on, StepKey::ExtensionScheduled);
            }
            other => panic!("expected BlockedStep, got {other:?}"),
        }
    }

    #[test]
    fn toggle_gates_every_dependent_step() {
        for def in checklist_steps() {
            let Some(dep) = def.depends_on else { continue };

            // Dependency incomplete: completing must fail.
            assert!(
                toggle(def.key, &ProgressMap::new()).is_err(),
                "step {} should be blocked without {}",
                def.key,
                dep
            );

            // Dependency complete: completing must succeed.
            let progress = progress_of(&[(dep, true)]);
            let next = toggle(def.key, &progress).expect("unblocked toggle succeeds");
            assert_eq!(next.get(&def.key), Some(&true));
        }
    }

    #[test]
    fn toggle_off_is_always_permitted_and_does_not_cascade() {
        let progress = progress_of(&[
            (StepKey::ExtensionScheduled, true),
            (StepKey::EmailSent, true),
        ]);

        // Un-complete the prerequisite.
        let next = toggle(StepKey::ExtensionScheduled, &progress).expect("toggle off succeeds");
        assert_eq!(next.get(&StepKey::ExtensionScheduled), Some(&false));
        // The dependent stays complete (preserved upstream behavior).
        assert_eq!(next.get(&StepKey::EmailSent), Some(&true));
    }

    #[test]
    fn completion_percentage_uses_fixed_total() {
        assert_eq!(completion_percentage(&ProgressMap::new()), 0.0);

        let one = progress_of(&[(StepKey::ExtensionScheduled, true)]);
        assert_eq!(completion_percentage(&one), 10.0);

        // False entries do not count.
        let mixed = progress_of(&[
            (StepKey::ExtensionScheduled, true),
            (StepKey::EmailSent, false),
        ]);
        assert_eq!(completion_percentage(&mixed), 10.0);

        let all: ProgressMap = checklist_steps().iter().map(|d| (d.key, true)).collect();
        assert_eq!(completion_percentage(&all), 100.0);
    }

    #[test]
    fn completion_percentage_stays_in_bounds() {
        let mut progress = ProgressMap::new();
        for def in checklist_steps() {
            progress.insert(def.key, true);
            let pct = completion_percentage(&progress);
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn overdue_and_due_soon_are_mutually_exclusive() {
        // Sweep a wide date range; no step may report both at once, and
        // completed or blocked steps may report neither.
        for offset in 0..60 {
            let states = evaluate(admission(), &ProgressMap::new(), false, day(offset));
            for state in &states {
                assert!(
                    !(state.overdue && state.due_soon),
                    "step {} overdue and due-soon at day {offset}",
                    state.key
                );
                if state.completed || state.blocked {
                    assert!(!state.overdue && !state.due_soon);
                }
            }
        }
    }

    #[test]
    fn completed_step_is_never_overdue() {
        let all: ProgressMap = checklist_steps().iter().map(|d| (d.key, true)).collect();
        let states = evaluate(admission(), &all, false, day(120));
        for state in states {
            assert!(state.completed);
            assert!(!state.overdue && !state.due_soon);
        }
    }

    #[test]
    fn happy_path_scenario() {
        // Day 5: extensionScheduled (due day 14) completed — not overdue,
        // not due soon.
        let progress = toggle(StepKey::ExtensionScheduled, &ProgressMap::new()).unwrap();
        let states = evaluate(admission(), &progress, false, day(5));
        let ext = states
            .iter()
            .find(|s| s.key == StepKey::ExtensionScheduled)
            .unwrap();
        assert!(ext.completed && !ext.overdue && !ext.due_soon);

        // Day 6: emailSent (due day 15) can now be completed.
        let progress = toggle(StepKey::EmailSent, &progress).expect("dependency met");
        let states = evaluate(admission(), &progress, false, day(6));
        let email = states.iter().find(|s| s.key == StepKey::EmailSent).unwrap();
        assert!(email.completed);
    }

    #[test]
    fn blocked_overdue_scenario() {
        // Day 20, nothing done: extensionScheduled (due day 14) is overdue,
        // and emailSent cannot be completed past either due date.
        let progress = ProgressMap::new();
        let states = evaluate(admission(), &progress, false, day(20));

        let ext = states
            .iter()
            .find(|s| s.key == StepKey::ExtensionScheduled)
            .unwrap();
        assert!(ext.overdue);

        let email = states.iter().find(|s| s.key == StepKey::EmailSent).unwrap();
        assert!(email.blocked);
        assert!(!email.overdue, "blocked steps are not reported overdue");

        assert!(matches!(
            toggle(StepKey::EmailSent, &progress),
            Err(CoordinatorError::BlockedStep { .. })
        ));
    }

    #[test]
    fn due_soon_window_spans_zero_to_three_days() {
        // extensionScheduled is due on day 14.
        for (offset, expected) in [(10, false), (11, true), (14, true), (15, false)] {
            let states = evaluate(admission(), &ProgressMap::new(), false, day(offset));
            let ext = &states[0];
            assert_eq!(
                ext.due_soon, expected,
                "day {offset}: due_soon should be {expected}"
            );
        }

        // Day 15 is past due instead.
        let states = evaluate(admission(), &ProgressMap::new(), false, day(15));
        assert!(states[0].overdue);
    }

    #[test]
    fn review_mode_flags_recurring_steps_only() {
        let states = evaluate(admission(), &ProgressMap::new(), true, day(0));
        for state in &states {
            let def = state.key.definition();
            assert_eq!(
                state.needs_recurring_attention, def.requires_recurring_review,
                "step {}",
                state.key
            );
        }

        // Completed steps drop out of the review set.
        let progress = progress_of(&[(StepKey::ExtensionScheduled, true)]);
        let states = evaluate(admission(), &progress, true, day(0));
        assert!(!states[0].needs_recurring_attention);

        // And review mode off flags nothing.
        let states = evaluate(admission(), &ProgressMap::new(), false, day(0));
        assert!(states.iter().all(|s| !s.needs_recurring_attention));
    }

    #[test]
    fn shipped_chain_is_valid() {
        validate_chain().expect("fixed checklist forms a valid chain");
    }

    #[test]
    fn broken_chain_is_rejected() {
        // Forward reference: first step depends on a later one.
        let broken = [
            StepDefinition {
                key: StepKey::ExtensionScheduled,
                label: "Extension Call Scheduled",
                due_after_days: 14,
                depends_on: Some(StepKey::EmailSent),
                requires_recurring_review: true,
                priority: StepPriority::High,
            },
            StepDefinition {
                key: StepKey::EmailSent,
                label: "Extension Email Sent",
                due_after_days: 15,
                depends_on: None,
                requires_recurring_review: true,
                priority: StepPriority::High,
            },
        ];
        assert!(validate_definitions(&broken).is_err());

        // Self reference.
        let cyclic = [StepDefinition {
            key: StepKey::ExtensionScheduled,
            label: "Extension Call Scheduled",
            due_after_days: 14,
            depends_on: Some(StepKey::ExtensionScheduled),
            requires_recurring_review: true,
            priority: StepPriority::High,
        }];
        assert!(validate_definitions(&cyclic).is_err());
    }
}
