//! Axum route handlers for the CV draft editor.
//!
//! Drafts are not stored server side: the client sends the current draft with each edit
//! and receives the updated one back.

use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::draft::{CvDraft, EducationField, ExperienceField};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub cv_text: String,
}

/// A single edit applied to a draft's experience or education list.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DraftEdit {
    AddExperience,
    UpdateExperience {
        id: Uuid,
        field: ExperienceField,
        value: String,
    },
    RemoveExperience {
        id: Uuid,
    },
    AddEducation,
    UpdateEducation {
        id: Uuid,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        id: Uuid,
    },
}

#[derive(Debug, Deserialize)]
pub struct DraftEditRequest {
    pub draft: CvDraft,
    pub edit: DraftEdit,
}

#[derive(Debug, Serialize)]
pub struct DraftEditResponse {
    pub draft: CvDraft,
    /// Id of the item created by an `add_*` edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<Uuid>,
}

/// POST /api/v1/draft
///
/// Pre-fills an editable draft from raw CV text.
pub async fn handle_draft(Json(request): Json<DraftRequest>) -> Result<Json<CvDraft>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Precondition("CV text is required".to_string()));
    }
    Ok(Json(CvDraft::from_text(&request.cv_text)))
}

/// POST /api/v1/draft/edit
pub async fn handle_draft_edit(
    Json(request): Json<DraftEditRequest>,
) -> Result<Json<DraftEditResponse>, AppError> {
    let DraftEditRequest { mut draft, edit } = request;
    let created_id = apply_edit(&mut draft, edit)?;
    Ok(Json(DraftEditResponse { draft, created_id }))
}

fn apply_edit(draft: &mut CvDraft, edit: DraftEdit) -> Result<Option<Uuid>, AppError> {
    let found = match edit {
        DraftEdit::AddExperience => return Ok(Some(draft.add_experience())),
        DraftEdit::AddEducation => return Ok(Some(draft.add_education())),
        DraftEdit::UpdateExperience { id, field, value } => {
            draft.update_experience(id, field, &value)
        }
        DraftEdit::RemoveExperience { id } => draft.remove_experience(id),
        DraftEdit::UpdateEducation { id, field, value } => {
            draft.update_education(id, field, &value)
        }
        DraftEdit::RemoveEducation { id } => draft.remove_education(id),
    };

    if found {
        Ok(None)
    } else {
        Err(AppError::NotFound("draft item not found".to_string()))
    }
}
