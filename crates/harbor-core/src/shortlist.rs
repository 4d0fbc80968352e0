//! Shortlist lifecycle engine.
//!
//! Pure functions over a client's ordered shortlist of candidate
//! placements. Entries are deduplicated by program id; status changes are
//! entirely user-driven (confirming one placement never touches the
//! others).

use crate::error::{CoordinatorError, Result};
use crate::models::{PlacementStatus, ProgramRef, ShortlistEntry};

/// Append candidate programs that are not already shortlisted.
///
/// Candidates whose `program_id` is already present are skipped; the rest
/// are appended in the order given, each starting at
/// [`PlacementStatus::Vetting`] with empty notes. Returns the new shortlist
/// together with the number of entries actually added, so callers can report
/// "N already on shortlist".
pub fn add(shortlist: &[ShortlistEntry], candidates: &[ProgramRef]) -> (Vec<ShortlistEntry>, usize) {
    let mut next = shortlist.to_vec();
    let mut added = 0;

    for candidate in candidates {
        if next.iter().any(|entry| entry.program_id == candidate.program_id) {
            continue;
        }
        next.push(ShortlistEntry {
            program_id: candidate.program_id.clone(),
            program_name: candidate.program_name.clone(),
            status: PlacementStatus::Vetting,
            notes: String::new(),
        });
        added += 1;
    }

    (next, added)
}

/// Remove the entry with the given program id.
///
/// A hard delete from the collection; no tombstone remains, so the program
/// can be re-added later. Removing an absent id is a no-op.
pub fn remove(shortlist: &[ShortlistEntry], program_id: &str) -> Vec<ShortlistEntry> {
    shortlist
        .iter()
        .filter(|entry| entry.program_id != program_id)
        .cloned()
        .collect()
}

/// Replace the status of the matching entry.
///
/// Fails with [`CoordinatorError::EntryNotFound`] when the program is not on
/// the shortlist. No other entry is touched.
pub fn set_status(
    shortlist: &[ShortlistEntry],
    program_id: &str,
    status: PlacementStatus,
) -> Result<Vec<ShortlistEntry>> {
    update_entry(shortlist, program_id, |entry| entry.status = status)
}

/// Replace the notes of the matching entry.
///
/// Fails with [`CoordinatorError::EntryNotFound`] when the program is not on
/// the shortlist. No length limit is enforced.
pub fn set_notes(
    shortlist: &[ShortlistEntry],
    program_id: &str,
    notes: &str,
) -> Result<Vec<ShortlistEntry>> {
    update_entry(shortlist, program_id, |entry| {
        entry.notes = notes.to_string()
    })
}

fn update_entry(
    shortlist: &[ShortlistEntry],
    program_id: &str,
    mutate: impl FnOnce(&mut ShortlistEntry),
) -> Result<Vec<ShortlistEntry>> {
    let mut next = shortlist.to_vec();
    match next.iter_mut().find(|entry| entry.program_id == program_id) {
        Some(entry) => {
            mutate(entry);
            Ok(next)
        }
        None => Err(CoordinatorError::EntryNotFound {
            program_id: program_id.to_string(),
        }),
    }
}
