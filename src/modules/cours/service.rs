use serde_json::json;
use uuid::Uuid;

use crate::provider::{DataProvider, Filter};
use crate::utils::errors::AppError;

use super::model::{Cours, CoursJoinRow, CoursWithClasse, CreateCoursDto, UpdateCoursDto};

const COURS_TABLE: &str = "cours";
const COURS_COLUMNS: &str = "id,titre,description,fichier_url,created_at,classe_id,classes(nom)";

/// Course gateway. All mutations are scoped to the owning teacher through
/// the filter chain itself; a non-owned target surfaces as zero rows and
/// becomes a 404 here, never a silent success.
pub struct CoursService;

impl CoursService {
    pub async fn list_for_enseignant(
        provider: &dyn DataProvider,
        enseignant_id: Uuid,
    ) -> Result<Vec<CoursWithClasse>, AppError> {
        let rows = provider
            .select(
                COURS_TABLE,
                COURS_COLUMNS,
                &[Filter::eq("enseignant_id", enseignant_id)],
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value::<CoursJoinRow>(row)
                    .map(CoursWithClasse::from)
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed course row: {}", e)))
            })
            .collect()
    }

    pub async fn create_cours(
        provider: &dyn DataProvider,
        enseignant_id: Uuid,
        dto: CreateCoursDto,
    ) -> Result<Cours, AppError> {
        let rows = provider
            .insert(
                COURS_TABLE,
                json!({
                    "classe_id": dto.classe_id,
                    "enseignant_id": enseignant_id,
                    "titre": dto.titre,
                    "description": dto.description,
                    "fichier_url": dto.fichier_url,
                }),
            )
            .await?;

        let row = rows.into_iter().next().ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("Provider returned no inserted course"))
        })?;

        serde_json::from_value(row)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed course row: {}", e)))
    }

    pub async fn update_cours(
        provider: &dyn DataProvider,
        enseignant_id: Uuid,
        cours_id: Uuid,
        dto: UpdateCoursDto,
    ) -> Result<Cours, AppError> {
        let rows = provider
            .update(
                COURS_TABLE,
                json!({
                    "classe_id": dto.classe_id,
                    "titre": dto.titre,
                    "description": dto.description,
                    "fichier_url": dto.fichier_url,
                }),
                &[
                    Filter::eq("id", cours_id),
                    Filter::eq("enseignant_id", enseignant_id),
                ],
            )
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Cours non trouvé")))?;

        serde_json::from_value(row)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed course row: {}", e)))
    }

    pub async fn delete_cours(
        provider: &dyn DataProvider,
        enseignant_id: Uuid,
        cours_id: Uuid,
    ) -> Result<(), AppError> {
        let rows = provider
            .delete(
                COURS_TABLE,
                &[
                    Filter::eq("id", cours_id),
                    Filter::eq("enseignant_id", enseignant_id),
                ],
            )
            .await?;

        if rows.is_empty() {
            return Err(AppError::not_found(anyhow::anyhow!("Cours non trouvé")));
        }

        Ok(())
    }
}
