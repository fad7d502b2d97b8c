//! Dependency cycle guard and save-time sanitizer.
//!
//! Files declare ordered dependency lists, forming an implicit directed
//! graph (edge `A -> B` iff `B` appears in `A`'s list). The invariant
//! enforced here is that the graph stays acyclic: a file may never
//! depend, directly or transitively, on itself or on anything that
//! depends on it. A cycle would send the downstream asset resolver into
//! infinite recursion at enqueue time, so candidates that would close a
//! loop are filtered out before anything is persisted. The check runs at
//! write time only; reads trust the stored graph.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::FileId;

/// Read access to stored dependency lists, one adjacency row per entity.
///
/// Unknown or empty ids yield an empty list, never an error.
#[async_trait]
pub trait DependencySource: Send + Sync {
    async fn dependencies_of(&self, id: FileId) -> Result<Vec<FileId>, CoreError>;
}

/// True if `subject` already depends on `candidate`, directly or through
/// any chain of stored dependency lists.
///
/// Iterative depth-first reachability with a visited set, so the walk
/// terminates even when the stored graph already contains a cycle
/// (possible when rows were seeded behind the guard's back). Direct
/// membership in `subject`'s own list is found on the first step, the
/// common case. Identity is not special-cased: `depends_on(a, a)` is
/// true only when `a` literally appears somewhere in its own chain.
pub async fn depends_on(
    source: &dyn DependencySource,
    subject: FileId,
    candidate: FileId,
) -> Result<bool, CoreError> {
    let mut visited: HashSet<FileId> = HashSet::new();
    let mut stack = vec![subject];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let deps = source.dependencies_of(id).await?;
        if deps.contains(&candidate) {
            return Ok(true);
        }
        stack.extend(deps);
    }

    Ok(false)
}

/// Why a submitted dependency candidate was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The candidate is, or already depends on, the file being saved;
    /// accepting it would close a loop back to the subject.
    DependsOnSubject,
    /// The file being saved is a revision, and the candidate is, or
    /// depends on, the revision's parent. Revisions count as their
    /// parent for dependency purposes.
    DependsOnRevisionParent,
}

/// A refused candidate and the rule that refused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDependency {
    pub id: FileId,
    pub reason: RejectReason,
}

/// Outcome of sanitizing a submitted dependency list.
///
/// `accepted` preserves the submitted relative order and is the only
/// thing that gets persisted. Rejections are reported to the caller but
/// never fail the save: the list is repaired, not refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizeOutcome {
    pub accepted: Vec<FileId>,
    pub rejected: Vec<RejectedDependency>,
}

/// Filter a submitted dependency list down to the candidates that do not
/// introduce a cycle.
///
/// A candidate is refused when it is the subject itself or already
/// depends on the subject, and -- on revision saves -- when the same
/// holds against the revision's parent id.
pub async fn sanitize_dependencies(
    source: &dyn DependencySource,
    subject: FileId,
    candidates: &[FileId],
    revision_parent: Option<FileId>,
) -> Result<SanitizeOutcome, CoreError> {
    let mut outcome = SanitizeOutcome {
        accepted: Vec::new(),
        rejected: Vec::new(),
    };

    for &candidate in candidates {
        if candidate == subject || depends_on(source, candidate, subject).await? {
            outcome.rejected.push(RejectedDependency {
                id: candidate,
                reason: RejectReason::DependsOnSubject,
            });
            continue;
        }

        if let Some(parent) = revision_parent {
            if candidate == parent || depends_on(source, candidate, parent).await? {
                outcome.rejected.push(RejectedDependency {
                    id: candidate,
                    reason: RejectReason::DependsOnRevisionParent,
                });
                continue;
            }
        }

        outcome.accepted.push(candidate);
    }

    Ok(outcome)
}
