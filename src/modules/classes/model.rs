use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A class record. `enseignant_id` is the owning teacher, set by the
/// provider when the class is assigned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Classe {
    pub id: Uuid,
    pub nom: String,
    #[serde(default)]
    pub niveau: Option<String>,
    #[serde(default)]
    pub enseignant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClasseDto {
    #[validate(length(min = 1))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub niveau: String,
}

/// A student as listed within a class roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Eleve {
    pub id: Uuid,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: String,
}
