use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course row as stored by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Cours {
    pub id: Uuid,
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fichier_url: Option<String>,
    pub classe_id: Uuid,
    #[serde(default)]
    pub enseignant_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Joined class name embedded in a course listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ClasseNom {
    pub nom: String,
}

/// Provider listing row with the embedded class, before flattening.
#[derive(Debug, Clone, Deserialize)]
pub struct CoursJoinRow {
    pub id: Uuid,
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fichier_url: Option<String>,
    pub classe_id: Uuid,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub classes: Option<ClasseNom>,
}

/// A course as returned to the frontend, with the class name flattened
/// onto the record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoursWithClasse {
    pub id: Uuid,
    pub titre: String,
    pub description: Option<String>,
    pub fichier_url: Option<String>,
    pub classe_id: Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub classe_nom: Option<String>,
}

impl From<CoursJoinRow> for CoursWithClasse {
    fn from(row: CoursJoinRow) -> Self {
        Self {
            id: row.id,
            titre: row.titre,
            description: row.description,
            fichier_url: row.fichier_url,
            classe_id: row.classe_id,
            created_at: row.created_at,
            classe_nom: row.classes.map(|c| c.nom),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCoursDto {
    pub classe_id: Uuid,
    #[validate(length(min = 1))]
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fichier_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCoursDto {
    pub classe_id: Uuid,
    #[validate(length(min = 1))]
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fichier_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_row_flattens_class_name() {
        let row: CoursJoinRow = serde_json::from_value(json!({
            "id": Uuid::new_v4().to_string(),
            "titre": "Fractions",
            "classe_id": Uuid::new_v4().to_string(),
            "classes": { "nom": "CM2 A" }
        }))
        .unwrap();

        let cours = CoursWithClasse::from(row);
        assert_eq!(cours.classe_nom.as_deref(), Some("CM2 A"));
    }

    #[test]
    fn join_row_without_class_keeps_none() {
        let row: CoursJoinRow = serde_json::from_value(json!({
            "id": Uuid::new_v4().to_string(),
            "titre": "Fractions",
            "classe_id": Uuid::new_v4().to_string()
        }))
        .unwrap();

        assert!(CoursWithClasse::from(row).classe_nom.is_none());
    }
}
