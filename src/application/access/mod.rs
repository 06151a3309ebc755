use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::Role;

// Presentation layer is responsible for turning HTTP inputs into a caller id.
// This module intentionally avoids depending on presentation types.

/// Effective role of `caller_id` on `writing_id`. Pure read; never fails for
/// "no access" — a missing writing and a stranger both come back as
/// `Role::None`, and it is the caller's job to translate that.
pub async fn resolve_role<W, C>(
    writings: &W,
    collaborators: &C,
    writing_id: Uuid,
    caller_id: Uuid,
) -> ServiceResult<Role>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    let Some(writing) = writings.get_by_id(writing_id).await? else {
        return Ok(Role::None);
    };
    if writing.owner_id == caller_id {
        return Ok(Role::Owner);
    }
    let role = collaborators
        .find(writing_id, caller_id)
        .await?
        .map(|c| c.role)
        .unwrap_or(Role::None);
    Ok(role)
}

/// Gate a read. Strangers get `NotFound`, never `Forbidden`, so that the
/// writing's existence is not disclosed.
pub async fn require_view<W, C>(
    writings: &W,
    collaborators: &C,
    writing_id: Uuid,
    caller_id: Uuid,
) -> ServiceResult<Role>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    let role = resolve_role(writings, collaborators, writing_id, caller_id).await?;
    if role.may_view() {
        Ok(role)
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Gate a content write. A viewer is told `Forbidden`; a stranger gets the
/// same `NotFound` as a missing writing.
pub async fn require_edit<W, C>(
    writings: &W,
    collaborators: &C,
    writing_id: Uuid,
    caller_id: Uuid,
) -> ServiceResult<Role>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    let role = resolve_role(writings, collaborators, writing_id, caller_id).await?;
    if role.may_edit() {
        Ok(role)
    } else if role.may_view() {
        Err(ServiceError::Forbidden)
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Gate an owner-only operation (share administration, invitations).
pub async fn require_owner<W, C>(
    writings: &W,
    collaborators: &C,
    writing_id: Uuid,
    caller_id: Uuid,
) -> ServiceResult<()>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    let role = resolve_role(writings, collaborators, writing_id, caller_id).await?;
    match role {
        Role::Owner => Ok(()),
        Role::None => Err(ServiceError::NotFound),
        _ => Err(ServiceError::Forbidden),
    }
}
